//! Per-class failures and the append-only reporter that collects them.
//!
//! Every fallible phase of the transformation converts its failure into a [`TransformError`]
//! instead of propagating a panic. A [`TransformError`] never aborts the stream: the class
//! carrying it falls back to its original, unmodified bytes (see [`crate::transform`]).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// The phase of the transformation that produced a [`TransformError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformErrorKind {
    /// Input bytes could not be parsed as a class file.
    BytecodeRead,
    /// Emission of the rewritten class file failed.
    BytecodeWrite,
    /// A malformed annotation member was encountered (e.g. a non-string `eventName`).
    AnnotationScan,
    /// A logic error occurred while rewriting a method body.
    Transformation,
    /// A post-emit structural check found an inconsistency.
    Validation,
    /// Reserved for the driver; the core never touches files itself.
    Io,
}

impl fmt::Display for TransformErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BytecodeRead => "BytecodeRead",
            Self::BytecodeWrite => "BytecodeWrite",
            Self::AnnotationScan => "AnnotationScan",
            Self::Transformation => "Transformation",
            Self::Validation => "Validation",
            Self::Io => "Io",
        };
        f.write_str(s)
    }
}

/// A single, non-fatal failure encountered while transforming one class.
#[derive(Clone, Debug, thiserror::Error)]
#[error("[{kind}] {class_name}: {message}")]
pub struct TransformError {
    /// Dotted or internal name of the class being transformed when the failure occurred.
    pub class_name: String,
    /// The phase that produced this failure.
    pub kind: TransformErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
    /// Optional underlying cause, rendered as a string so this type stays `Clone`.
    pub cause: Option<String>,
    /// Free-form context (method name, descriptor, annotation member, ...).
    pub context: BTreeMap<String, String>,
}

impl TransformError {
    /// Creates a new error with no context.
    pub fn new(class_name: impl Into<String>, kind: TransformErrorKind, message: impl Into<String>) -> Self {
        Self { class_name: class_name.into(), kind, message: message.into(), cause: None, context: BTreeMap::new() }
    }

    /// Attaches an underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// Attaches a piece of free-form context.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Thread-safe, append-only collector of [`TransformError`]s.
///
/// A driver constructs one `ErrorReporter` per build and passes a clone (it is `Clone` and
/// cheaply shareable via an internal `Arc`) into every [`crate::transform::transform_class`]
/// call. Readers observe a monotonically growing sequence; the reporter never removes entries.
#[derive(Clone, Debug, Default)]
pub struct ErrorReporter {
    errors: Arc<Mutex<Vec<TransformError>>>,
}

impl ErrorReporter {
    /// Creates a new, empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error, logging it at `warn` level on ingest.
    pub fn report(&self, error: TransformError) {
        tracing::warn!(
            kind = %error.kind,
            class = %error.class_name,
            message = %error.message,
            "class transformation error",
        );
        self.errors.lock().push(error);
    }

    /// Returns a snapshot of every error recorded so far.
    pub fn snapshot(&self) -> Vec<TransformError> {
        self.errors.lock().clone()
    }

    /// Returns the number of errors recorded so far.
    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    /// Returns `true` if no errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    /// Renders a human-readable, multi-line summary grouped by class, suitable for a
    /// driver's end-of-build log.
    pub fn report_summary(&self) -> String {
        let errors = self.snapshot();
        if errors.is_empty() {
            return "no transformation errors".to_string();
        }
        let mut by_class: BTreeMap<&str, Vec<&TransformError>> = BTreeMap::new();
        for error in &errors {
            by_class.entry(error.class_name.as_str()).or_default().push(error);
        }
        let mut out = format!("{} transformation error(s) across {} class(es):\n", errors.len(), by_class.len());
        for (class_name, class_errors) in by_class {
            out.push_str(&format!("  {class_name}:\n"));
            for error in class_errors {
                out.push_str(&format!("    [{}] {}\n", error.kind, error.message));
            }
        }
        out
    }
}
