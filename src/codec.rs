//! The one place that implements [`InsnFactory`] against `ristretto_classfile`'s real
//! constant-pool and instruction types, and drives decode/encode of the class-file bytes
//! themselves (component B).
//!
//! Everything above this module (the filter, classifier, annotation extractor, strategy, and the
//! three visitors) works purely in terms of [`crate::annotations::ParsedAnnotation`],
//! [`crate::bytecode::InsnFactory`], and plain method-body instruction vectors. This module is the
//! adapter that makes that pure, generic logic talk to an actual class file.

use ristretto_classfile::attributes::{Attribute, Instruction};
use ristretto_classfile::{ClassFile, ConstantPool};

use crate::bytecode::{InsnFactory, JvmType};
use crate::error::{TransformError, TransformErrorKind};

/// Parses `bytes` into a [`ClassFile`], wrapping any failure as a [`TransformErrorKind::BytecodeRead`].
pub fn decode(class_name: &str, bytes: &[u8]) -> Result<ClassFile, TransformError> {
    let mut cursor = std::io::Cursor::new(bytes);
    ClassFile::from_bytes(&mut cursor).map_err(|cause| {
        TransformError::new(class_name, TransformErrorKind::BytecodeRead, "failed to parse class file")
            .with_cause(cause)
    })
}

/// Serializes `class_file` back to bytes, wrapping any failure as a
/// [`TransformErrorKind::BytecodeWrite`].
pub fn encode(class_name: &str, class_file: &ClassFile) -> Result<Vec<u8>, TransformError> {
    let mut bytes = Vec::new();
    class_file.to_bytes(&mut bytes).map_err(|cause| {
        TransformError::new(class_name, TransformErrorKind::BytecodeWrite, "failed to emit class file")
            .with_cause(cause)
    })?;
    Ok(bytes)
}

/// Builds the JVM instructions this engine ever needs against a class's live constant pool,
/// interning constant-pool entries on demand.
pub struct ClassFileInsnFactory<'a> {
    constant_pool: &'a mut ConstantPool,
}

impl<'a> ClassFileInsnFactory<'a> {
    /// Wraps a class file's constant pool for the duration of one method's rewriting.
    pub fn new(constant_pool: &'a mut ConstantPool) -> Self {
        Self { constant_pool }
    }

    fn method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> Result<u16, ristretto_classfile::Error> {
        self.constant_pool.add_method_ref(owner, name, descriptor)
    }

    fn interface_method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> Result<u16, ristretto_classfile::Error> {
        self.constant_pool.add_interface_method_ref(owner, name, descriptor)
    }
}

impl InsnFactory for ClassFileInsnFactory<'_> {
    type Insn = Instruction;
    type Error = ristretto_classfile::Error;

    fn aload0(&mut self) -> Result<Self::Insn, Self::Error> {
        Ok(Instruction::Aload_0)
    }

    fn ldc_string(&mut self, value: &str) -> Result<Self::Insn, Self::Error> {
        let index = self.constant_pool.add_string(value)?;
        Ok(Instruction::Ldc(index))
    }

    fn iconst_bool(&mut self, value: bool) -> Result<Self::Insn, Self::Error> {
        Ok(if value { Instruction::Iconst_1 } else { Instruction::Iconst_0 })
    }

    fn new_object(&mut self, internal_class_name: &str) -> Result<Self::Insn, Self::Error> {
        let index = self.constant_pool.add_class(internal_class_name)?;
        Ok(Instruction::New(index))
    }

    fn ldc_int(&mut self, value: i32) -> Result<Self::Insn, Self::Error> {
        let index = self.constant_pool.add_integer(value)?;
        Ok(Instruction::Ldc(index))
    }

    fn dup(&mut self) -> Result<Self::Insn, Self::Error> {
        Ok(Instruction::Dup)
    }

    fn pop(&mut self) -> Result<Self::Insn, Self::Error> {
        Ok(Instruction::Pop)
    }

    fn return_void(&mut self) -> Result<Self::Insn, Self::Error> {
        Ok(Instruction::Return)
    }

    fn invoke_special(&mut self, owner: &str, name: &str, descriptor: &str) -> Result<Self::Insn, Self::Error> {
        Ok(Instruction::Invokespecial(self.method_ref(owner, name, descriptor)?))
    }

    fn invoke_static(&mut self, owner: &str, name: &str, descriptor: &str) -> Result<Self::Insn, Self::Error> {
        Ok(Instruction::Invokestatic(self.method_ref(owner, name, descriptor)?))
    }

    fn invoke_interface(&mut self, owner: &str, name: &str, descriptor: &str) -> Result<Self::Insn, Self::Error> {
        let index = self.interface_method_ref(owner, name, descriptor)?;
        // argument count is `this` plus the two object-reference arguments, never varargs here.
        Ok(Instruction::Invokeinterface(index, 3))
    }

    fn load_param(&mut self, jvm_type: JvmType, local_slot: u16) -> Result<Self::Insn, Self::Error> {
        Ok(match jvm_type {
            JvmType::Long => Instruction::Lload(local_slot),
            JvmType::Float => Instruction::Fload(local_slot),
            JvmType::Double => Instruction::Dload(local_slot),
            JvmType::Reference => Instruction::Aload(local_slot),
            JvmType::Int | JvmType::Boolean | JvmType::Byte | JvmType::Short | JvmType::Char => {
                Instruction::Iload(local_slot)
            }
        })
    }

    fn box_primitive(&mut self, jvm_type: JvmType) -> Result<Self::Insn, Self::Error> {
        let (owner, descriptor) = match jvm_type {
            JvmType::Int => ("java/lang/Integer", "(I)Ljava/lang/Integer;"),
            JvmType::Long => ("java/lang/Long", "(J)Ljava/lang/Long;"),
            JvmType::Float => ("java/lang/Float", "(F)Ljava/lang/Float;"),
            JvmType::Double => ("java/lang/Double", "(D)Ljava/lang/Double;"),
            JvmType::Boolean => ("java/lang/Boolean", "(Z)Ljava/lang/Boolean;"),
            JvmType::Byte => ("java/lang/Byte", "(B)Ljava/lang/Byte;"),
            JvmType::Short => ("java/lang/Short", "(S)Ljava/lang/Short;"),
            JvmType::Char => ("java/lang/Character", "(C)Ljava/lang/Character;"),
            JvmType::Reference => unreachable!("box_primitive is never called for a reference type"),
        };
        Ok(Instruction::Invokestatic(self.method_ref(owner, "valueOf", descriptor)?))
    }
}

/// Returns the code attribute's instruction list, if `attribute` is [`Attribute::Code`].
pub fn code_instructions(attribute: &Attribute) -> Option<&Vec<Instruction>> {
    match attribute {
        Attribute::Code { code, .. } => Some(code),
        _ => None,
    }
}
