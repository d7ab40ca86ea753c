//! Decides whether a class is even a candidate for transformation (component C).

use crate::config::TransformerConfig;
use crate::constants::SYSTEM_PACKAGE_PREFIXES;

/// Returns `true` if `dotted_name` is instrumentable under `config`.
///
/// Rules, in order: (1) `enabled == false` -> not instrumentable; (2) a system-package prefix
/// match -> not instrumentable; (3) a non-empty include list with no matching prefix -> not
/// instrumentable; (4) an exclude-list prefix match -> not instrumentable; (5) otherwise
/// instrumentable.
pub fn is_instrumentable(dotted_name: &str, config: &TransformerConfig) -> bool {
    if !config.enabled {
        return false;
    }
    if starts_with_any(dotted_name, SYSTEM_PACKAGE_PREFIXES) {
        return false;
    }
    if !config.include_packages.is_empty()
        && !starts_with_any(dotted_name, &config.include_packages)
    {
        return false;
    }
    if starts_with_any(dotted_name, &config.exclude_packages) {
        return false;
    }
    true
}

fn starts_with_any<S: AsRef<str>>(name: &str, prefixes: &[S]) -> bool {
    prefixes.iter().any(|prefix| name.starts_with(prefix.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_master_switch_excludes_everything() {
        let config = TransformerConfig::disabled();
        assert!(!is_instrumentable("com.acme.MainActivity", &config));
    }

    #[test]
    fn system_prefixes_are_always_excluded() {
        let config = TransformerConfig::new();
        assert!(!is_instrumentable("android.app.Activity", &config));
        assert!(!is_instrumentable("androidx.fragment.app.Fragment", &config));
        assert!(!is_instrumentable("java.lang.Object", &config));
        assert!(!is_instrumentable("kotlin.Unit", &config));
    }

    #[test]
    fn include_list_restricts_to_matching_prefixes() {
        let config = TransformerConfig::new().with_include_packages(["com.acme"]);
        assert!(is_instrumentable("com.acme.MainActivity", &config));
        assert!(!is_instrumentable("com.other.MainActivity", &config));
    }

    #[test]
    fn exclude_list_only_matches_subpackages_as_a_string_prefix() {
        let config = TransformerConfig::new().with_exclude_packages(["com.x.debug."]);
        // "com.x.Debug" is not a subpackage of "com.x.debug." - not excluded.
        assert!(is_instrumentable("com.x.Debug", &config));
        // "com.x.debug.Foo" is excluded.
        assert!(!is_instrumentable("com.x.debug.Foo", &config));
    }

    #[test]
    fn empty_include_list_means_no_restriction() {
        let config = TransformerConfig::new();
        assert!(is_instrumentable("anything.at.all.Foo", &config));
    }
}
