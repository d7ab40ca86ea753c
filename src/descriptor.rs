//! Parses JVM method descriptors into an ordered parameter-type list and the local-variable
//! slot each parameter occupies.
//!
//! Descriptor parsing itself is delegated to [`jdescriptor`], the small, focused crate the JVM
//! static-analysis ecosystem already reaches for (see `DESIGN.md`). This module only adds the
//! slot-accounting rule component H needs: width 2 for `long`/`double`, width 1 otherwise, with
//! the starting slot being 0 for a static method and 1 for an instance method (to skip `this`).

use jdescriptor::{FieldType, MethodDescriptor};

use crate::error::{TransformError, TransformErrorKind};

/// The JVM type of a single parameter, collapsed to what component H needs to know: which load
/// opcode to emit and which wrapper type to box into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JvmType {
    /// `int`, `short`, `byte`, `char`, or `boolean`, all loaded with `iload` and boxed via their
    /// own wrapper's `valueOf`.
    Int,
    /// `long`.
    Long,
    /// `float`.
    Float,
    /// `double`.
    Double,
    /// `boolean`, tracked distinctly from [`JvmType::Int`] only for boxing (`Boolean.valueOf`).
    Boolean,
    /// `byte`, tracked distinctly from [`JvmType::Int`] only for boxing (`Byte.valueOf`).
    Byte,
    /// `short`, tracked distinctly from [`JvmType::Int`] only for boxing (`Short.valueOf`).
    Short,
    /// `char`, tracked distinctly from [`JvmType::Int`] only for boxing (`Character.valueOf`).
    Char,
    /// Any object or array type, loaded with `aload` and never boxed.
    Reference,
}

impl JvmType {
    /// The number of local-variable slots this type occupies: 2 for `long`/`double`, 1 otherwise.
    pub const fn slot_width(self) -> u16 {
        match self {
            Self::Long | Self::Double => 2,
            _ => 1,
        }
    }

    /// `true` for every variant except [`JvmType::Reference`].
    pub const fn is_primitive(self) -> bool {
        !matches!(self, Self::Reference)
    }

    fn from_field_type(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Int => Self::Int,
            FieldType::Long => Self::Long,
            FieldType::Float => Self::Float,
            FieldType::Double => Self::Double,
            FieldType::Boolean => Self::Boolean,
            FieldType::Byte => Self::Byte,
            FieldType::Short => Self::Short,
            FieldType::Char => Self::Char,
            FieldType::Object(_) | FieldType::Array(_) => Self::Reference,
        }
    }
}

/// A single parameter: its JVM type and the local-variable slot it occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedParameter {
    /// The parameter's JVM type.
    pub jvm_type: JvmType,
    /// The local-variable slot this parameter's value lives in.
    pub local_slot: u16,
}

/// Parses `descriptor` into an ordered list of parameters with their local-variable slots.
///
/// `is_static` determines the starting slot: 0 for a static method, 1 for an instance method
/// (slot 0 is reserved for `this`).
pub fn parse_parameter_slots(
    class_name: &str,
    descriptor: &str,
    is_static: bool,
) -> Result<Vec<ParsedParameter>, TransformError> {
    let method: MethodDescriptor = descriptor.parse().map_err(|cause| {
        TransformError::new(
            class_name,
            TransformErrorKind::Transformation,
            format!("unparseable method descriptor `{descriptor}`"),
        )
        .with_cause(cause)
        .with_context("descriptor", descriptor)
    })?;

    let mut slot: u16 = if is_static { 0 } else { 1 };
    let mut params = Vec::with_capacity(method.parameter_types().len());
    for field_type in method.parameter_types() {
        let jvm_type = JvmType::from_field_type(field_type);
        params.push(ParsedParameter { jvm_type, local_slot: slot });
        slot += jvm_type.slot_width();
    }
    Ok(params)
}
