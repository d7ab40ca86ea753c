//! The small instruction-construction seam between the semantic rewriting logic (components G,
//! H, I) and the class-file codec (component B).
//!
//! Rather than hard-coding a particular class-file library's instruction representation into the
//! rewriting logic, every visitor in [`crate::visitor`] is generic over an [`InsnFactory`]: a
//! trait describing exactly the handful of JVM instructions this engine ever constructs (it
//! never needs to *interpret* arbitrary opcodes, everything it doesn't construct itself is
//! forwarded untouched). The codec module is the one place that implements this trait against
//! `ristretto_classfile`'s real instruction and constant-pool types; the rewriting logic itself
//! is plain, pure, and testable against a trivial mock factory.

pub use crate::descriptor::JvmType;

/// Constructs the JVM instructions this engine ever needs to splice into a method body.
///
/// Implementors own constant-pool management: each method takes plain names/descriptors and is
/// responsible for interning whatever constant-pool entries the resulting instruction needs.
/// Interning can fail (the constant pool is capped at 65535 entries), so every method returns a
/// `Result`; callers must treat a failure as abandoning just the rewrite in progress, never as a
/// reason to panic (see `transform.rs`).
pub trait InsnFactory {
    /// The host class-file library's instruction type.
    type Insn: Clone;
    /// The error a constant-pool interning call can fail with.
    type Error: std::fmt::Display;

    /// `aload_0`, loads `this`.
    fn aload0(&mut self) -> Result<Self::Insn, Self::Error>;

    /// `ldc <value>` for a string constant.
    fn ldc_string(&mut self, value: &str) -> Result<Self::Insn, Self::Error>;

    /// `iconst_1` if `value`, `iconst_0` otherwise.
    fn iconst_bool(&mut self, value: bool) -> Result<Self::Insn, Self::Error>;

    /// `new <internal_class_name>`.
    fn new_object(&mut self, internal_class_name: &str) -> Result<Self::Insn, Self::Error>;

    /// `ldc <size>` for an integer constant, used for `new HashMap(size)`.
    fn ldc_int(&mut self, value: i32) -> Result<Self::Insn, Self::Error>;

    /// `dup`.
    fn dup(&mut self) -> Result<Self::Insn, Self::Error>;

    /// `pop`.
    fn pop(&mut self) -> Result<Self::Insn, Self::Error>;

    /// `return` (void).
    fn return_void(&mut self) -> Result<Self::Insn, Self::Error>;

    /// `invokespecial owner.name:descriptor`.
    fn invoke_special(&mut self, owner: &str, name: &str, descriptor: &str) -> Result<Self::Insn, Self::Error>;

    /// `invokestatic owner.name:descriptor`.
    fn invoke_static(&mut self, owner: &str, name: &str, descriptor: &str) -> Result<Self::Insn, Self::Error>;

    /// `invokeinterface owner.name:descriptor`.
    fn invoke_interface(&mut self, owner: &str, name: &str, descriptor: &str) -> Result<Self::Insn, Self::Error>;

    /// Loads the value of a parameter of the given type from the given local-variable slot
    /// (`iload`/`lload`/`fload`/`dload`/`aload` as appropriate).
    fn load_param(&mut self, jvm_type: JvmType, local_slot: u16) -> Result<Self::Insn, Self::Error>;

    /// Boxes the primitive on top of the stack via its wrapper type's `valueOf`. Never called
    /// for [`JvmType::Reference`].
    fn box_primitive(&mut self, jvm_type: JvmType) -> Result<Self::Insn, Self::Error>;
}
