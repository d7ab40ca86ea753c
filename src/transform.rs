//! The public entry point gluing every component together for one class (component M).

use ristretto_classfile::attributes::{Annotation, Attribute, ElementValue};
use ristretto_classfile::ClassFile;

use crate::annotations::{self, AnnotationValue, ParsedAnnotation};
use crate::codec::{self, ClassFileInsnFactory};
use crate::config::TransformerConfig;
use crate::constants::{HELPER_METHOD_DESCRIPTOR, HELPER_METHOD_NAME};
use crate::descriptor;
use crate::error::{ErrorReporter, TransformError, TransformErrorKind};
use crate::filter;
use crate::model::ClassTransformContext;
use crate::strategy;
use crate::visitor::{helper, lifecycle, track};

/// Transforms a single class file's bytes according to `config`, weaving in screen- and
/// method-level analytics calls per the annotations the class carries.
///
/// Never panics. Any phase that fails has its failure recorded on `errors` and the original
/// `bytes` are returned unchanged for that phase's scope: a decode or encode failure passes the
/// whole class through untouched, and a single method's rewrite failure only abandons that method.
pub fn transform_class(dotted_name: &str, bytes: &[u8], config: &TransformerConfig, errors: &ErrorReporter) -> Vec<u8> {
    if !filter::is_instrumentable(dotted_name, config) {
        return bytes.to_vec();
    }

    let mut class_file = match codec::decode(dotted_name, bytes) {
        Ok(class_file) => class_file,
        Err(error) => {
            errors.report(error);
            return bytes.to_vec();
        }
    };

    let internal_name = match class_file.constant_pool.try_get_class(class_file.this_class) {
        Ok(name) => name.to_string(),
        Err(cause) => {
            errors.report(
                TransformError::new(dotted_name, TransformErrorKind::BytecodeRead, "unreadable this_class entry")
                    .with_cause(cause),
            );
            return bytes.to_vec();
        }
    };
    let super_internal_name = if class_file.super_class == 0 {
        None
    } else {
        class_file.constant_pool.try_get_class(class_file.super_class).ok().map(str::to_string)
    };

    let existing_method_names: Vec<String> = class_file
        .methods
        .iter()
        .filter_map(|method| class_file.constant_pool.try_get_utf8(method.name_index).ok().map(str::to_string))
        .collect();

    let mut ctx = ClassTransformContext::new(internal_name.clone(), super_internal_name);
    if ctx.already_transformed(&existing_method_names) {
        return bytes.to_vec();
    }

    let class_annotations = class_file
        .attributes
        .iter()
        .find_map(runtime_visible_annotations)
        .map(|raw| parse_annotations(&class_file, raw, &internal_name, &mut ctx.errors))
        .unwrap_or_default();
    let (track_screen_meta, trackable_marked) =
        annotations::extract_class_metadata(&internal_name, &class_annotations, &mut ctx.errors);
    ctx.track_screen_meta = track_screen_meta;
    ctx.trackable_marked = trackable_marked;

    for method_index in 0..class_file.methods.len() {
        rewrite_method(
            &mut class_file,
            method_index,
            &internal_name,
            ctx.class_type,
            config,
            &mut ctx.errors,
            &mut ctx.lifecycle_targets,
        );
    }

    if ctx.needs_helper_method() {
        if let Err(error) = append_helper_method(&mut class_file, &ctx) {
            ctx.errors.push(error);
        }
    }

    let output = match codec::encode(dotted_name, &class_file) {
        Ok(output) => output,
        Err(error) => {
            ctx.errors.push(error);
            flush(errors, ctx.errors);
            return bytes.to_vec();
        }
    };

    flush(errors, ctx.errors);
    output
}

fn flush(reporter: &ErrorReporter, errors: Vec<TransformError>) {
    for error in errors {
        reporter.report(error);
    }
}

fn runtime_visible_annotations(attribute: &Attribute) -> Option<&Vec<Annotation>> {
    match attribute {
        Attribute::RuntimeVisibleAnnotations { annotations, .. } => Some(annotations),
        _ => None,
    }
}

fn runtime_visible_parameter_annotations(attribute: &Attribute) -> Option<&Vec<Vec<Annotation>>> {
    match attribute {
        Attribute::RuntimeVisibleParameterAnnotations { parameter_annotations, .. } => Some(parameter_annotations),
        _ => None,
    }
}

fn parse_annotations(
    class_file: &ClassFile,
    raw: &[Annotation],
    class_name: &str,
    errors: &mut Vec<TransformError>,
) -> Vec<ParsedAnnotation> {
    raw.iter()
        .filter_map(|annotation| parse_annotation(class_file, annotation, class_name, errors))
        .collect()
}

fn parse_annotation(
    class_file: &ClassFile,
    annotation: &Annotation,
    class_name: &str,
    errors: &mut Vec<TransformError>,
) -> Option<ParsedAnnotation> {
    let type_descriptor = match class_file.constant_pool.try_get_utf8(annotation.type_index) {
        Ok(descriptor) => descriptor.to_string(),
        Err(cause) => {
            errors.push(
                TransformError::new(class_name, TransformErrorKind::AnnotationScan, "unreadable annotation type")
                    .with_cause(cause),
            );
            return None;
        }
    };

    let mut parsed = ParsedAnnotation::new(type_descriptor);
    for element in &annotation.elements {
        let Ok(name) = class_file.constant_pool.try_get_utf8(element.0) else { continue };
        let value = element_value(class_file, &element.1);
        parsed.members.push((name.to_string(), value));
    }
    Some(parsed)
}

fn element_value(class_file: &ClassFile, value: &ElementValue) -> AnnotationValue {
    match value {
        ElementValue::String { const_value_index } => class_file
            .constant_pool
            .try_get_utf8(*const_value_index)
            .map(|s| AnnotationValue::String(s.to_string()))
            .unwrap_or(AnnotationValue::Other),
        ElementValue::Boolean { const_value_index } => class_file
            .constant_pool
            .try_get_integer(*const_value_index)
            .map(|i| AnnotationValue::Bool(i != 0))
            .unwrap_or(AnnotationValue::Other),
        ElementValue::Int { const_value_index } => class_file
            .constant_pool
            .try_get_integer(*const_value_index)
            .map(|i| AnnotationValue::Int(i64::from(i)))
            .unwrap_or(AnnotationValue::Other),
        _ => AnnotationValue::Other,
    }
}

/// Rewrites one method in place: lifecycle injection and `@Track` prelude are independent
/// phases, so a failure in either (malformed descriptor, constant-pool overflow) only abandons
/// that phase for this method, records a [`TransformError`] on `errors`, and leaves the other
/// phase's outcome (and the method's original bytes, if neither phase applies) untouched. Never
/// panics. Inserts the method's name into `lifecycle_targets` iff the lifecycle visitor actually
/// injected a call, so a synthesized helper method is never left dangling with no caller.
fn rewrite_method(
    class_file: &mut ClassFile,
    method_index: usize,
    internal_name: &str,
    class_type: crate::model::ClassType,
    config: &TransformerConfig,
    errors: &mut Vec<TransformError>,
    lifecycle_targets: &mut std::collections::HashSet<String>,
) {
    let method = &class_file.methods[method_index];
    let method_name = match class_file.constant_pool.try_get_utf8(method.name_index) {
        Ok(name) => name.to_string(),
        Err(cause) => {
            errors.push(
                TransformError::new(internal_name, TransformErrorKind::Transformation, "unreadable method name")
                    .with_cause(cause),
            );
            return;
        }
    };
    let method_descriptor = match class_file.constant_pool.try_get_utf8(method.descriptor_index) {
        Ok(descriptor) => descriptor.to_string(),
        Err(cause) => {
            errors.push(
                TransformError::new(internal_name, TransformErrorKind::Transformation, "unreadable method descriptor")
                    .with_cause(cause),
            );
            return;
        }
    };
    let is_static = method.access_flags.contains(ristretto_classfile::MethodAccessFlags::STATIC);

    let method_annotations = method
        .attributes
        .iter()
        .find_map(runtime_visible_annotations)
        .map(|raw| parse_annotations(class_file, raw, internal_name, errors))
        .unwrap_or_default();
    let param_annotations: Vec<Vec<ParsedAnnotation>> = method
        .attributes
        .iter()
        .find_map(runtime_visible_parameter_annotations)
        .map(|raw| raw.iter().map(|per_param| parse_annotations(class_file, per_param, internal_name, errors)).collect())
        .unwrap_or_default();

    let lifecycle_decision = strategy::decide(class_type, &method_name, &method_descriptor);
    let track_metadata = track::absorb_track_metadata(&method_name, &method_annotations, &param_annotations, config);

    if !lifecycle_decision.should_instrument() && track_metadata.is_none() {
        return;
    }

    // a malformed descriptor abandons only the `@Track` prelude; lifecycle injection needs no
    // parameter information and still proceeds.
    let parameter_slots = track_metadata.as_ref().and_then(|_| {
        match descriptor::parse_parameter_slots(internal_name, &method_descriptor, is_static) {
            Ok(slots) => Some(slots),
            Err(error) => {
                errors.push(error);
                None
            }
        }
    });
    let track_metadata = track_metadata.filter(|_| parameter_slots.is_some());

    if !lifecycle_decision.should_instrument() && track_metadata.is_none() {
        return;
    }

    let super_call_indices: std::collections::HashSet<u16> = if lifecycle_decision.should_instrument() {
        let method = &class_file.methods[method_index];
        let Some(code_attribute) = method.attributes.iter().find(|a| matches!(a, Attribute::Code { .. })) else {
            return;
        };
        let Attribute::Code { code, .. } = code_attribute else { unreachable!() };
        code.iter()
            .filter_map(|insn| match insn {
                ristretto_classfile::attributes::Instruction::Invokespecial(index) => Some(*index),
                _ => None,
            })
            .filter(|index| {
                class_file
                    .constant_pool
                    .try_get_method_ref(*index)
                    .map(|(_, called_name, called_descriptor)| {
                        called_name == method_name && called_descriptor == method_descriptor
                    })
                    .unwrap_or(false)
            })
            .collect()
    } else {
        std::collections::HashSet::new()
    };

    let method = &mut class_file.methods[method_index];
    let Some(code_attribute) = method.attributes.iter_mut().find(|a| matches!(a, Attribute::Code { .. })) else {
        return;
    };
    let Attribute::Code { max_stack, code, .. } = code_attribute else { unreachable!() };

    let mut constant_pool = std::mem::take(&mut class_file.constant_pool);
    let mut factory = ClassFileInsnFactory::new(&mut constant_pool);

    if lifecycle_decision.should_instrument() {
        let owner = internal_name.to_string();
        match lifecycle::inject_after_super_call(&mut factory, &owner, code, |insn| {
            matches!(insn, ristretto_classfile::attributes::Instruction::Invokespecial(index)
                if super_call_indices.contains(index))
        }) {
            Ok((rewritten, injected)) => {
                if injected {
                    *code = rewritten;
                    *max_stack += 1;
                    lifecycle_targets.insert(method_name.clone());
                }
            }
            Err(cause) => {
                errors.push(
                    TransformError::new(internal_name, TransformErrorKind::BytecodeWrite, "failed to build lifecycle injection call")
                        .with_cause(cause),
                );
            }
        }
    }

    if let Some(track_metadata) = track_metadata {
        let slots = parameter_slots.unwrap_or_default();
        match track::build_track_prelude(&mut factory, &track_metadata, &slots, config.max_parameters_per_method) {
            Ok(prelude) => {
                let peak = track::prelude_peak_stack(&track_metadata, &slots, config.max_parameters_per_method);
                let mut new_code = prelude;
                new_code.extend(code.iter().cloned());
                *code = new_code;
                *max_stack = (*max_stack).max(peak);
            }
            Err(cause) => {
                errors.push(
                    TransformError::new(internal_name, TransformErrorKind::BytecodeWrite, "failed to build @Track prelude")
                        .with_cause(cause),
                );
            }
        }
    }

    class_file.constant_pool = constant_pool;
}

/// Synthesizes `__injectAnalyticsTracking()V` and appends it to `class_file`. The constant pool
/// is always restored to `class_file` before returning, whether this succeeds or fails, so a
/// failure here (constant-pool overflow) never leaves the class with a corrupted pool.
fn append_helper_method(class_file: &mut ClassFile, ctx: &ClassTransformContext) -> Result<(), TransformError> {
    let simple_name = ctx.simple_name().to_string();
    let meta = ctx.track_screen_meta.clone().unwrap_or_default();
    let screen_name = meta.effective_screen_name(&simple_name);
    let screen_class = meta.effective_screen_class(&simple_name);

    let mut constant_pool = std::mem::take(&mut class_file.constant_pool);
    let outcome = (|| -> Result<(u16, u16, Vec<ristretto_classfile::attributes::Instruction>), TransformError> {
        let name_index = constant_pool.add_utf8(HELPER_METHOD_NAME).map_err(|cause| {
            TransformError::new(&ctx.internal_name, TransformErrorKind::BytecodeWrite, "failed to intern helper method name")
                .with_cause(cause)
        })?;
        let descriptor_index = constant_pool.add_utf8(HELPER_METHOD_DESCRIPTOR).map_err(|cause| {
            TransformError::new(&ctx.internal_name, TransformErrorKind::BytecodeWrite, "failed to intern helper method descriptor")
                .with_cause(cause)
        })?;
        let mut factory = ClassFileInsnFactory::new(&mut constant_pool);
        let body = helper::build_helper_method_body(&mut factory, &screen_name, &screen_class).map_err(|cause| {
            TransformError::new(&ctx.internal_name, TransformErrorKind::BytecodeWrite, "failed to build helper method body")
                .with_cause(cause)
        })?;
        Ok((name_index, descriptor_index, body))
    })();

    class_file.constant_pool = constant_pool;
    let (name_index, descriptor_index, body) = outcome?;

    let code_attribute = Attribute::Code {
        max_stack: helper::HELPER_METHOD_MAX_STACK,
        max_locals: helper::HELPER_METHOD_MAX_LOCALS,
        code: body,
        exception_table: Vec::new(),
        attributes: Vec::new(),
    };

    class_file.methods.push(ristretto_classfile::Method {
        access_flags: ristretto_classfile::MethodAccessFlags::PRIVATE,
        name_index,
        descriptor_index,
        attributes: vec![code_attribute],
    });
    Ok(())
}
