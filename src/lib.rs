//! Weaves analytics instrumentation into compiled JVM bytecode.
//!
//! Given a stream of compiled classes (one class file = one independent transformation unit),
//! [`transform_class`] produces a semantically-equivalent output stream in which:
//!
//! - classes carrying a `@TrackScreen` annotation have had screen-tracking calls woven into
//!   specific lifecycle methods (`onCreate(Bundle)` for Activity-kind classes,
//!   `onViewCreated(View,Bundle)` for Fragment-kind classes), and
//! - methods carrying a `@Track` annotation receive an entry-point call that reports the event
//!   name and the captured values of parameters carrying `@Param` to a runtime tracking facade.
//!
//! The engine never evaluates branches, never proves the absence of exceptions, and never
//! re-links binaries across class boundaries: every decision is made purely from bytecode
//! metadata (annotations, descriptors, the immediate superclass) observed while streaming a
//! single class.
//!
//! ## Feature Flags
//!
//! - `serde`: derives `Serialize`/`Deserialize` on [`config::TransformerConfig`] so a build-tool
//!   driver can load it directly from a project's configuration file.

#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

/// Fixed class-internal names, descriptors, and method signatures used during transformation.
pub mod constants;

/// Typed, defaulted configuration surface consumed by the orchestrator.
pub mod config;

/// Structured per-class failures and the append-only reporter that collects them.
pub mod error;

/// Transient entities that exist only for the duration of transforming one class.
pub mod model;

/// Decides whether a class is even a candidate for transformation.
pub mod filter;

/// Classifies a class as `Activity`, `Fragment`, or `Other` from its immediate superclass.
pub mod classifier;

/// Captures `@TrackScreen` / `@Trackable` metadata while visiting a class.
pub mod annotations;

/// Decides whether a given method is an instrumentation target.
pub mod strategy;

/// Parses JVM method descriptors into parameter types and local-variable slot widths.
pub mod descriptor;

/// The seam between the semantic rewriting logic and the class-file codec.
pub mod bytecode;

/// `ristretto_classfile` integration: decode/encode and the real [`bytecode::InsnFactory`] impl.
pub mod codec;

/// Method-visitor state machines that rewrite method bodies and synthesize new ones.
pub mod visitor;

/// The public entry point gluing every component together for one class.
pub mod transform;

/// Post-emit structural checks used by the test suite.
pub mod validator;

pub use config::TransformerConfig;
pub use error::{ErrorReporter, TransformError, TransformErrorKind};
pub use model::ClassType;
pub use transform::transform_class;
