//! Exercises the [`TransformerConfig`] builder surface and its interaction with the filter and
//! track-method visitor the way a driver assembling a config from build-tool properties would.

use annotation_weaver::config::TransformerConfig;
use annotation_weaver::filter;
use annotation_weaver::visitor::track;

#[test]
fn disabled_master_switch_overrides_every_other_setting() {
    let config = TransformerConfig::new()
        .with_include_packages(["com.acme"])
        .with_method_tracking_enabled(true);
    let config = TransformerConfig { enabled: false, ..config };

    assert!(!filter::is_instrumentable("com.acme.MainActivity", &config));
}

#[test]
fn exclude_methods_list_blocks_track_absorption_regardless_of_annotation() {
    let config = TransformerConfig::new().with_exclude_methods(["onPause"]);
    let track_annotation = annotation_weaver::annotations::ParsedAnnotation::new(
        "Lcom/shalan/analytics/annotation/Track;",
    );
    assert!(track::absorb_track_metadata("onPause", &[track_annotation], &[], &config).is_none());
}

#[test]
fn builder_chain_produces_the_expected_final_config() {
    let config = TransformerConfig::new()
        .with_debug_mode(true)
        .with_include_packages(["com.acme"])
        .with_exclude_packages(["com.acme.internal"])
        .with_max_parameters_per_method(4)
        .with_exclude_methods(["onTrimMemory"]);

    assert!(config.debug_mode);
    assert_eq!(config.include_packages, vec!["com.acme".to_string()]);
    assert_eq!(config.exclude_packages, vec!["com.acme.internal".to_string()]);
    assert_eq!(config.max_parameters_per_method, 4);
    assert!(config.exclude_methods.contains("onTrimMemory"));
}
