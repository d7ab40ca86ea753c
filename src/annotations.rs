//! Captures `@TrackScreen` / `@Trackable` metadata while visiting a class (component E).
//!
//! This module is deliberately decoupled from the class-file codec's own annotation
//! representation: [`ParsedAnnotation`] is the semantic shape every annotation on a class,
//! method, or parameter is normalized to before the rest of the engine ever sees it. [`crate::
//! visitor`] builds these from whatever `ristretto_classfile` hands back; everything downstream,
//! extraction and `@Track`/`@Param` absorption, works purely against this small, testable model.

use crate::constants::{TRACKABLE_DESCRIPTOR, TRACK_SCREEN_DESCRIPTOR};
use crate::error::{TransformError, TransformErrorKind};
use crate::model::TrackScreenMetadata;

/// The value of a single annotation member, after decoding.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationValue {
    /// A string-constant member.
    String(String),
    /// A boolean-constant member.
    Bool(bool),
    /// An integer-constant member.
    Int(i64),
    /// Any other member kind this engine does not need to interpret.
    Other,
}

impl AnnotationValue {
    /// Returns the string value, if this is [`AnnotationValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is [`AnnotationValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// A single decoded annotation: its type descriptor and its `(name, value)` members.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedAnnotation {
    /// The annotation's type descriptor, e.g. `Lcom/shalan/analytics/annotation/Track;`.
    pub type_descriptor: String,
    /// The annotation's members, in declaration order.
    pub members: Vec<(String, AnnotationValue)>,
}

impl ParsedAnnotation {
    /// Creates a new, empty annotation of the given type.
    pub fn new(type_descriptor: impl Into<String>) -> Self {
        Self { type_descriptor: type_descriptor.into(), members: Vec::new() }
    }

    /// Adds a member, returning `self` for chaining in test fixtures.
    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.members.push((name.into(), value));
        self
    }

    /// Looks up a member by name.
    pub fn member(&self, name: &str) -> Option<&AnnotationValue> {
        self.members.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Looks up a string member, accepting either of two member names and preferring the first
    /// (the "explicit" name) when both are present. Used for the `value`/`screenName` and
    /// `value`/`name` ambiguities these annotations allow.
    pub fn string_member_any(&self, preferred: &str, fallback: &str) -> Option<&str> {
        self.member(preferred).and_then(AnnotationValue::as_str).or_else(|| {
            self.member(fallback).and_then(AnnotationValue::as_str)
        })
    }
}

/// Finds the first annotation in `annotations` whose type descriptor matches `descriptor`.
pub fn find<'a>(annotations: &'a [ParsedAnnotation], descriptor: &str) -> Option<&'a ParsedAnnotation> {
    annotations.iter().find(|a| a.type_descriptor == descriptor)
}

/// Extracts class-level `@TrackScreen` metadata and the `@Trackable` flag from a class's
/// annotations.
///
/// Malformed members (a `screenName`/`screenClass` present but not a string) are recorded as
/// [`TransformErrorKind::AnnotationScan`] and treated as absent, so fallback rules still apply.
pub fn extract_class_metadata(
    class_name: &str,
    annotations: &[ParsedAnnotation],
    errors: &mut Vec<TransformError>,
) -> (Option<TrackScreenMetadata>, bool) {
    let trackable_marked = find(annotations, TRACKABLE_DESCRIPTOR).is_some();

    let track_screen_meta = find(annotations, TRACK_SCREEN_DESCRIPTOR).map(|annotation| {
        let screen_name = match annotation.member("screenName").or_else(|| annotation.member("value")) {
            Some(AnnotationValue::String(s)) => Some(s.clone()),
            Some(other) if !matches!(other, AnnotationValue::Other) => {
                errors.push(TransformError::new(
                    class_name,
                    TransformErrorKind::AnnotationScan,
                    "@TrackScreen.screenName is not a string member",
                ));
                None
            }
            _ => None,
        };
        let screen_class = match annotation.member("screenClass") {
            Some(AnnotationValue::String(s)) => Some(s.clone()),
            Some(other) if !matches!(other, AnnotationValue::Other) => {
                errors.push(TransformError::new(
                    class_name,
                    TransformErrorKind::AnnotationScan,
                    "@TrackScreen.screenClass is not a string member",
                ));
                None
            }
            _ => None,
        };
        TrackScreenMetadata { screen_name, screen_class }
    });

    (track_screen_meta, trackable_marked)
}
