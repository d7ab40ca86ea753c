//! Post-emit structural checks used by the test suite (component K).
//!
//! None of these run as part of [`crate::transform::transform_class`] itself, since the orchestrator
//! never second-guesses its own output. They exist so the property suite in the integration tests
//! can assert on the *shape* of emitted bytecode without hand-decoding class files.

use ristretto_classfile::attributes::{Attribute, Instruction};
use ristretto_classfile::ClassFile;

use crate::codec;
use crate::constants::{
    HELPER_METHOD_NAME, METHOD_TRACKING_MANAGER_METHOD, TRACK_SCREEN_HELPER_METHOD,
};
use crate::error::{TransformError, TransformErrorKind};

/// A validated summary of an emitted class, built from a successful structural check.
#[derive(Debug)]
pub struct ValidationSummary {
    /// The class's own internal name.
    pub class_name: String,
    /// The immediate superclass's internal name, if any.
    pub super_name: Option<String>,
    /// Number of methods in the class.
    pub method_count: usize,
    /// `true` if the synthesized helper method is present.
    pub has_helper_method: bool,
    /// Number of `invokestatic` calls to `TrackScreenHelper.trackScreen` found across all methods.
    pub screen_tracking_call_count: usize,
    /// Number of `invokestatic` calls to `MethodTrackingManager.track` found across all methods.
    pub method_tracking_call_count: usize,
}

/// Re-parses `emitted_bytes` and confirms it describes the same class identity as `original`,
/// returning a [`ValidationSummary`] for further property assertions.
///
/// Checks performed: (a) the bytes re-parse as a class file; (b) class name and immediate
/// superclass are unchanged from `original`; (c) every method's `max_locals` covers the highest
/// local-variable slot any load instruction in its body references.
pub fn validate(class_name: &str, original: &ClassFile, emitted_bytes: &[u8]) -> Result<ValidationSummary, TransformError> {
    let emitted = codec::decode(class_name, emitted_bytes)?;

    let original_name = class_name_of(original, class_name)?;
    let emitted_name = class_name_of(&emitted, class_name)?;
    if original_name != emitted_name {
        return Err(TransformError::new(
            class_name,
            TransformErrorKind::Validation,
            format!("class name changed: {original_name} -> {emitted_name}"),
        ));
    }

    let original_super = super_name_of(original);
    let emitted_super = super_name_of(&emitted);
    if original_super != emitted_super {
        return Err(TransformError::new(
            class_name,
            TransformErrorKind::Validation,
            "immediate superclass changed across transformation",
        ));
    }

    let mut has_helper_method = false;
    let mut screen_tracking_call_count = 0;
    let mut method_tracking_call_count = 0;

    for method in &emitted.methods {
        let name = emitted.constant_pool.try_get_utf8(method.name_index).map_err(|cause| {
            TransformError::new(class_name, TransformErrorKind::Validation, "unreadable method name").with_cause(cause)
        })?;
        if name == HELPER_METHOD_NAME {
            has_helper_method = true;
        }

        for attribute in &method.attributes {
            if let Attribute::Code { max_locals, code, .. } = attribute {
                if let Some(required) = max_required_locals(code) {
                    if required > *max_locals {
                        return Err(TransformError::new(
                            class_name,
                            TransformErrorKind::Validation,
                            format!(
                                "max_locals ({max_locals}) is too small for a load instruction \
                                 that needs {required} local-variable slots"
                            ),
                        ));
                    }
                }
                for instruction in code {
                    match instruction {
                        Instruction::Invokestatic(index) => {
                            if let Ok((owner, called_name, _)) = emitted.constant_pool.try_get_method_ref(*index) {
                                if called_name == TRACK_SCREEN_HELPER_METHOD && owner.contains("TrackScreenHelper") {
                                    screen_tracking_call_count += 1;
                                } else if called_name == METHOD_TRACKING_MANAGER_METHOD
                                    && owner.contains("MethodTrackingManager")
                                {
                                    method_tracking_call_count += 1;
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    Ok(ValidationSummary {
        class_name: emitted_name,
        super_name: emitted_super,
        method_count: emitted.methods.len(),
        has_helper_method,
        screen_tracking_call_count,
        method_tracking_call_count,
    })
}

/// The smallest `max_locals` that would cover every local-variable slot a load instruction in
/// `code` references, or `None` if `code` loads no locals at all.
///
/// Only covers the load opcodes this engine itself emits (`iload`/`lload`/`fload`/`dload`/
/// `aload`, including `aload_0` for `this`); it is not a general-purpose bytecode verifier.
fn max_required_locals(code: &[Instruction]) -> Option<u16> {
    code.iter()
        .filter_map(|instruction| match instruction {
            Instruction::Iload(slot) | Instruction::Fload(slot) | Instruction::Aload(slot) => Some(slot + 1),
            Instruction::Lload(slot) | Instruction::Dload(slot) => Some(slot + 2),
            Instruction::Aload_0 => Some(1),
            _ => None,
        })
        .max()
}

fn class_name_of(class_file: &ClassFile, class_name: &str) -> Result<String, TransformError> {
    class_file.constant_pool.try_get_class(class_file.this_class).map(str::to_string).map_err(|cause| {
        TransformError::new(class_name, TransformErrorKind::Validation, "unreadable this_class entry").with_cause(cause)
    })
}

fn super_name_of(class_file: &ClassFile) -> Option<String> {
    if class_file.super_class == 0 {
        return None;
    }
    class_file.constant_pool.try_get_class(class_file.super_class).map(str::to_string).ok()
}
