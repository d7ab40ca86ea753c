//! Transient entities that exist only for the duration of transforming one class.

use std::collections::HashSet;

use crate::error::TransformError;

/// The classification of a class, derived once from its immediate superclass and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassType {
    /// Extends one of the recognized Activity superclasses.
    Activity,
    /// Extends one of the recognized Fragment superclasses.
    Fragment,
    /// Anything else, including classes with no superclass information.
    Other,
}

impl ClassType {
    /// Returns `true` for [`ClassType::Activity`] or [`ClassType::Fragment`].
    pub const fn is_instrumentable_kind(self) -> bool {
        matches!(self, Self::Activity | Self::Fragment)
    }
}

/// Metadata captured from a `@TrackScreen` class-level annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackScreenMetadata {
    /// The `screenName` (or `value`) member, if present and non-empty.
    pub screen_name: Option<String>,
    /// The `screenClass` member, if present and non-empty.
    pub screen_class: Option<String>,
}

impl TrackScreenMetadata {
    /// Resolves the effective screen name, falling back to `simple_name` with a trailing
    /// `Activity`/`Fragment`/`Screen` suffix stripped when absent or empty.
    pub fn effective_screen_name(&self, simple_name: &str) -> String {
        match &self.screen_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => strip_screen_suffix(simple_name),
        }
    }

    /// Resolves the effective screen class, falling back to `simple_name` verbatim when absent
    /// or empty.
    pub fn effective_screen_class(&self, simple_name: &str) -> String {
        match &self.screen_class {
            Some(class) if !class.is_empty() => class.clone(),
            _ => simple_name.to_string(),
        }
    }
}

/// Strips one trailing `Activity`/`Fragment`/`Screen` suffix from a simple class name.
pub fn strip_screen_suffix(simple_name: &str) -> String {
    for suffix in crate::constants::SCREEN_NAME_SUFFIXES {
        if let Some(stripped) = simple_name.strip_suffix(suffix) {
            if !stripped.is_empty() {
                return stripped.to_string();
            }
        }
    }
    simple_name.to_string()
}

/// A single `@Param`-tagged parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamEntry {
    /// Zero-based source parameter index (not a local-variable slot).
    pub index: u16,
    /// Name from the `@Param` annotation's `name`/`value` member, or `paramN` if absent.
    pub name: String,
}

/// Metadata captured from a `@Track` method-level annotation plus its `@Param` children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackMetadata {
    /// The `eventName` member. Required; defaults to an empty string if truly absent, and an
    /// empty string is still emitted verbatim (never synthesized).
    pub event_name: String,
    /// The `includeGlobalParams` member, defaulting to `true`.
    pub include_global_params: bool,
    /// `@Param`-tagged parameters, in discovery order.
    pub params: Vec<ParamEntry>,
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self { event_name: String::new(), include_global_params: true, params: Vec::new() }
    }
}

/// The outcome of the method-instrumentation strategy (component F).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstrumentationDecision {
    /// This method is a lifecycle instrumentation target, for the given reason.
    ShouldInstrument(&'static str),
    /// This method is not a lifecycle instrumentation target.
    Skip,
}

impl InstrumentationDecision {
    /// Returns `true` if this decision is [`InstrumentationDecision::ShouldInstrument`].
    pub const fn should_instrument(self) -> bool {
        matches!(self, Self::ShouldInstrument(_))
    }
}

/// Per-class state accumulated while visiting one class file.
///
/// Created at the start of a class visit, consumed while visiting, and discarded at class end.
/// There is no cross-class state carried here.
#[derive(Clone, Debug)]
pub struct ClassTransformContext {
    /// Slash-separated internal name, e.g. `com/x/MainActivity`.
    pub internal_name: String,
    /// Slash-separated internal name of the immediate superclass, if any.
    pub super_internal_name: Option<String>,
    /// Derived once from `super_internal_name`, never mutated afterwards.
    pub class_type: ClassType,
    /// Set when a `@TrackScreen` class-level annotation is observed.
    pub track_screen_meta: Option<TrackScreenMetadata>,
    /// `true` if a `@Trackable` class-level annotation is observed.
    pub trackable_marked: bool,
    /// Method names wrapped by the lifecycle visitor.
    pub lifecycle_targets: HashSet<String>,
    /// Non-fatal failures encountered while transforming this class.
    pub errors: Vec<TransformError>,
}

impl ClassTransformContext {
    /// Creates a new context for a class with the given internal name and superclass.
    pub fn new(internal_name: impl Into<String>, super_internal_name: Option<String>) -> Self {
        let internal_name = internal_name.into();
        let class_type = crate::classifier::classify(super_internal_name.as_deref());
        Self {
            internal_name,
            super_internal_name,
            class_type,
            track_screen_meta: None,
            trackable_marked: false,
            lifecycle_targets: HashSet::new(),
            errors: Vec::new(),
        }
    }

    /// Returns the class's simple name (the internal name's last `/`-separated segment).
    pub fn simple_name(&self) -> &str {
        self.internal_name.rsplit('/').next().unwrap_or(&self.internal_name)
    }

    /// Returns `true` iff a helper method should be synthesized for this class: a
    /// `@TrackScreen` annotation was observed and at least one lifecycle method was
    /// instrumented.
    pub fn needs_helper_method(&self) -> bool {
        self.track_screen_meta.is_some() && !self.lifecycle_targets.is_empty()
    }

    /// Returns `true` if the class already carries a previously-synthesized helper method,
    /// which signals that this class has already been transformed (idempotence, §8 property 2).
    pub fn already_transformed(&self, existing_method_names: &[String]) -> bool {
        existing_method_names.iter().any(|name| name == crate::constants::HELPER_METHOD_NAME)
    }
}
