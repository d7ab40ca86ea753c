//! Typed, defaulted configuration surface consumed by the orchestrator.
//!
//! This is the Rust-side mirror of the build-tool extension's properties (`enabled`,
//! `debugMode`, include/exclude package lists, method-tracking knobs). The core never reads a
//! build file itself; a driver constructs a [`TransformerConfig`] however it likes (Gradle
//! extension, CLI flags, a config file) and passes a shared reference into
//! [`crate::transform::transform_class`].

use std::collections::HashSet;

use crate::constants::DEFAULT_MAX_PARAMETERS_PER_METHOD;

/// Configuration for the transformer.
///
/// Use [`TransformerConfig::new`] for the production defaults (everything enabled, a parameter
/// cap of 10), or [`TransformerConfig::disabled`] for a master-off pass-through configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformerConfig {
    /// Master switch. `false` means every class is passed through unchanged.
    pub enabled: bool,
    /// Verbose logging only; no behavioral change.
    pub debug_mode: bool,
    /// If non-empty, restricts instrumentation to classes whose dotted name starts with any
    /// listed prefix.
    pub include_packages: Vec<String>,
    /// Classes whose dotted name starts with any listed prefix are skipped.
    pub exclude_packages: Vec<String>,
    /// Master switch for `@Track` instrumentation.
    pub method_tracking_enabled: bool,
    /// Upper bound on the number of `@Param`s captured per `@Track` method.
    pub max_parameters_per_method: usize,
    /// Method names for which `@Track` must be ignored, regardless of the annotation.
    pub exclude_methods: HashSet<String>,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformerConfig {
    /// Returns the production defaults: everything enabled, a parameter cap of 10, no
    /// include/exclude restrictions.
    pub fn new() -> Self {
        Self {
            enabled: true,
            debug_mode: false,
            include_packages: Vec::new(),
            exclude_packages: Vec::new(),
            method_tracking_enabled: true,
            max_parameters_per_method: DEFAULT_MAX_PARAMETERS_PER_METHOD,
            exclude_methods: HashSet::new(),
        }
    }

    /// Returns a configuration with the master switch off: every class is passed through
    /// byte-identical to its input.
    pub fn disabled() -> Self {
        Self { enabled: false, ..Self::new() }
    }

    /// Enables debug-mode logging.
    #[must_use]
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Restricts instrumentation to the given dotted-name package prefixes.
    #[must_use]
    pub fn with_include_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_packages = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Excludes the given dotted-name package prefixes from instrumentation.
    #[must_use]
    pub fn with_exclude_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_packages = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Configures whether `@Track` instrumentation runs at all.
    #[must_use]
    pub fn with_method_tracking_enabled(mut self, method_tracking_enabled: bool) -> Self {
        self.method_tracking_enabled = method_tracking_enabled;
        self
    }

    /// Sets the upper bound on `@Param`s captured per `@Track` method.
    #[must_use]
    pub fn with_max_parameters_per_method(mut self, max: usize) -> Self {
        self.max_parameters_per_method = max;
        self
    }

    /// Excludes the given method names from `@Track` instrumentation.
    #[must_use]
    pub fn with_exclude_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_methods = methods.into_iter().map(Into::into).collect();
        self
    }
}
