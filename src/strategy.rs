//! Decides whether a given method is a lifecycle instrumentation target (component F).

use crate::constants::{
    ACTIVITY_METHOD_DESCRIPTOR, ACTIVITY_METHOD_NAME, FRAGMENT_METHOD_DESCRIPTOR,
    FRAGMENT_METHOD_NAME,
};
use crate::model::{ClassType, InstrumentationDecision};

/// Decides whether `(name, descriptor)` on a class of `class_type` is a lifecycle
/// instrumentation target.
pub fn decide(class_type: ClassType, name: &str, descriptor: &str) -> InstrumentationDecision {
    match class_type {
        ClassType::Activity if name == ACTIVITY_METHOD_NAME && descriptor == ACTIVITY_METHOD_DESCRIPTOR => {
            InstrumentationDecision::ShouldInstrument("Activity.onCreate")
        }
        ClassType::Fragment if name == FRAGMENT_METHOD_NAME && descriptor == FRAGMENT_METHOD_DESCRIPTOR => {
            InstrumentationDecision::ShouldInstrument("Fragment.onViewCreated")
        }
        _ => InstrumentationDecision::Skip,
    }
}
