//! Absorbs `@Track`/`@Param` metadata and builds the entry-point prelude a tracked method's body
//! is prefixed with (component H).

use crate::annotations::{find, ParsedAnnotation};
use crate::bytecode::InsnFactory;
use crate::config::TransformerConfig;
use crate::constants::{
    COLLECTIONS_CLASS, EMPTY_MAP_DESCRIPTOR, EMPTY_MAP_METHOD, HASH_MAP_CLASS,
    METHOD_TRACKING_MANAGER_CLASS, METHOD_TRACKING_MANAGER_DESCRIPTOR,
    METHOD_TRACKING_MANAGER_METHOD, PARAM_DESCRIPTOR, TRACK_DESCRIPTOR,
};
use crate::descriptor::ParsedParameter;
use crate::model::{ParamEntry, TrackMetadata};

const HASH_MAP_INIT_DESCRIPTOR: &str = "(I)V";
const MAP_PUT_DESCRIPTOR: &str = "(Ljava/lang/Object;Ljava/lang/Object;)Ljava/lang/Object;";
const MAP_INTERFACE: &str = crate::constants::MAP_INTERFACE;

/// Absorbs a method's `@Track`/`@Param` annotations into a [`TrackMetadata`], or `None` if
/// tracking is disabled for this method (globally, by exclusion list, or by the annotation's
/// absence).
///
/// `param_annotations[i]` holds the annotations observed on source parameter `i`.
pub fn absorb_track_metadata(
    method_name: &str,
    method_annotations: &[ParsedAnnotation],
    param_annotations: &[Vec<ParsedAnnotation>],
    config: &TransformerConfig,
) -> Option<TrackMetadata> {
    if !config.method_tracking_enabled || config.exclude_methods.contains(method_name) {
        return None;
    }

    let track_annotation = find(method_annotations, TRACK_DESCRIPTOR)?;
    let event_name = track_annotation.member("eventName").and_then(|v| v.as_str()).unwrap_or("").to_string();
    let include_global_params =
        track_annotation.member("includeGlobalParams").and_then(|v| v.as_bool()).unwrap_or(true);

    let mut params = Vec::new();
    for (index, annotations) in param_annotations.iter().enumerate() {
        if let Some(param_annotation) = find(annotations, PARAM_DESCRIPTOR) {
            let name = param_annotation
                .string_member_any("name", "value")
                .map(str::to_string)
                .unwrap_or_else(|| format!("param{index}"));
            params.push(ParamEntry { index: index as u16, name });
        }
    }

    Some(TrackMetadata { event_name, include_global_params, params })
}

/// Builds the entry-point prelude emitted before a `@Track` method's original body.
///
/// `parameter_slots` is the full, source-order list of the method's parameters (from
/// [`crate::descriptor::parse_parameter_slots`]); `track.params` indexes into it by source
/// parameter index. Params beyond `max_parameters_per_method` are dropped, preserving source
/// order (component H / §8 property 7).
///
/// Fails if the factory can't intern a constant-pool entry the prelude needs; callers must
/// abandon the `@Track` injection for this method in that case, not panic.
pub fn build_track_prelude<F: InsnFactory>(
    factory: &mut F,
    track: &TrackMetadata,
    parameter_slots: &[ParsedParameter],
    max_parameters_per_method: usize,
) -> Result<Vec<F::Insn>, F::Error> {
    let mut out = Vec::new();
    out.push(factory.ldc_string(&track.event_name)?);

    let capped: Vec<&ParamEntry> = track.params.iter().take(max_parameters_per_method).collect();
    if capped.is_empty() {
        out.push(factory.invoke_static(COLLECTIONS_CLASS, EMPTY_MAP_METHOD, EMPTY_MAP_DESCRIPTOR)?);
    } else {
        out.push(factory.new_object(HASH_MAP_CLASS)?);
        out.push(factory.dup()?);
        out.push(factory.ldc_int(capped.len() as i32)?);
        out.push(factory.invoke_special(HASH_MAP_CLASS, "<init>", HASH_MAP_INIT_DESCRIPTOR)?);

        for param in capped {
            let Some(slot) = parameter_slots.get(param.index as usize) else { continue };
            out.push(factory.dup()?);
            out.push(factory.ldc_string(&param.name)?);
            out.push(factory.load_param(slot.jvm_type, slot.local_slot)?);
            if slot.jvm_type.is_primitive() {
                out.push(factory.box_primitive(slot.jvm_type)?);
            }
            out.push(factory.invoke_interface(MAP_INTERFACE, "put", MAP_PUT_DESCRIPTOR)?);
            out.push(factory.pop()?);
        }
    }

    out.push(factory.iconst_bool(track.include_global_params)?);
    out.push(factory.invoke_static(
        METHOD_TRACKING_MANAGER_CLASS,
        METHOD_TRACKING_MANAGER_METHOD,
        METHOD_TRACKING_MANAGER_DESCRIPTOR,
    )?);
    Ok(out)
}

/// The peak operand-stack depth, in JVM stack slots, that [`build_track_prelude`] reaches while
/// emitting its instructions for `track`/`parameter_slots`/`max_parameters_per_method`.
///
/// The event-name string stays on the stack underneath the whole map-construction sequence and
/// is only consumed by the final `track(...)` call, so the peak while `put`-ing a parameter is
/// `event(1) + map(1) + map(1) + name(1) + value(slot width)`: 5 for a reference or category-1
/// primitive, 6 for a category-2 primitive (`long`/`double`). With no params the prelude never
/// builds a `HashMap` and peaks at 3 (`event`, `Collections.emptyMap()`, the trailing boolean).
pub fn prelude_peak_stack(
    track: &TrackMetadata,
    parameter_slots: &[ParsedParameter],
    max_parameters_per_method: usize,
) -> u16 {
    let capped: Vec<&ParamEntry> = track.params.iter().take(max_parameters_per_method).collect();
    if capped.is_empty() {
        return 3;
    }

    let widest_param = capped
        .iter()
        .filter_map(|param| parameter_slots.get(param.index as usize))
        .map(|slot| slot.jvm_type.slot_width())
        .max()
        .unwrap_or(1);
    4 + widest_param
}
