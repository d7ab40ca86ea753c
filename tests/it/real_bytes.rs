//! Exercises [`annotation_weaver::transform::transform_class`] against a hand-built, real
//! `ristretto_classfile::ClassFile` end to end, the one integration path [`scenarios`] deliberately
//! leaves uncovered by only ever driving the pure visitor logic against the mock instruction
//! factory.
//!
//! [`scenarios`]: super::scenarios

use ristretto_classfile::attributes::{Annotation, Attribute, ElementValue, Instruction};
use ristretto_classfile::{ClassFile, Method, MethodAccessFlags};

use annotation_weaver::config::TransformerConfig;
use annotation_weaver::error::ErrorReporter;
use annotation_weaver::transform::transform_class;
use annotation_weaver::validator;

const SUPERCLASS: &str = "androidx/appcompat/app/AppCompatActivity";
const TRACK_SCREEN_DESCRIPTOR: &str = "Lcom/shalan/analytics/annotation/TrackScreen;";

/// Builds `com/x/MainActivity extends AppCompatActivity`, annotated `@TrackScreen(screenName =
/// "Home")`, with a single `onCreate(Landroid/os/Bundle;)V` method whose body calls
/// `super.onCreate(bundle)` then returns.
fn build_main_activity() -> ClassFile {
    let mut class_file = ClassFile::default();

    let this_class = class_file.constant_pool.add_class("com/x/MainActivity").unwrap();
    let super_class = class_file.constant_pool.add_class(SUPERCLASS).unwrap();
    class_file.this_class = this_class;
    class_file.super_class = super_class;

    let type_index = class_file.constant_pool.add_utf8(TRACK_SCREEN_DESCRIPTOR).unwrap();
    let screen_name_key = class_file.constant_pool.add_utf8("screenName").unwrap();
    let screen_name_value = class_file.constant_pool.add_utf8("Home").unwrap();
    class_file.attributes.push(Attribute::RuntimeVisibleAnnotations {
        annotations: vec![Annotation {
            type_index,
            elements: vec![(screen_name_key, ElementValue::String { const_value_index: screen_name_value })],
        }],
    });

    let name_index = class_file.constant_pool.add_utf8("onCreate").unwrap();
    let descriptor_index = class_file.constant_pool.add_utf8("(Landroid/os/Bundle;)V").unwrap();
    let super_method_ref =
        class_file.constant_pool.add_method_ref(SUPERCLASS, "onCreate", "(Landroid/os/Bundle;)V").unwrap();

    let code = vec![
        Instruction::Aload_0,
        Instruction::Aload(1),
        Instruction::Invokespecial(super_method_ref),
        Instruction::Return,
    ];
    class_file.methods.push(Method {
        access_flags: MethodAccessFlags::PUBLIC,
        name_index,
        descriptor_index,
        attributes: vec![Attribute::Code {
            max_stack: 2,
            max_locals: 2,
            code,
            exception_table: Vec::new(),
            attributes: Vec::new(),
        }],
    });

    class_file
}

#[test]
fn activity_with_track_screen_gets_a_helper_method_and_a_call_site() {
    let class_file = build_main_activity();
    let mut bytes = Vec::new();
    class_file.to_bytes(&mut bytes).unwrap();

    let config = TransformerConfig::new();
    let reporter = ErrorReporter::new();
    let transformed = transform_class("com.x.MainActivity", &bytes, &config, &reporter);

    assert!(reporter.is_empty(), "unexpected errors: {:?}", reporter.snapshot());
    assert_ne!(transformed, bytes, "transformation should have rewritten the class");

    let summary = validator::validate("com/x/MainActivity", &class_file, &transformed).unwrap();
    assert_eq!(summary.class_name, "com/x/MainActivity");
    assert_eq!(summary.super_name, Some(SUPERCLASS.to_string()));
    assert_eq!(summary.method_count, 2);
    assert!(summary.has_helper_method);
    assert_eq!(summary.screen_tracking_call_count, 1);
}

#[test]
fn transforming_already_transformed_bytes_is_a_no_op() {
    let class_file = build_main_activity();
    let mut bytes = Vec::new();
    class_file.to_bytes(&mut bytes).unwrap();

    let config = TransformerConfig::new();
    let reporter = ErrorReporter::new();
    let once = transform_class("com.x.MainActivity", &bytes, &config, &reporter);
    let twice = transform_class("com.x.MainActivity", &once, &config, &reporter);

    assert_eq!(once, twice, "re-transforming an already-instrumented class must be a no-op");
}

#[test]
fn disabled_config_passes_every_class_through_unchanged() {
    let class_file = build_main_activity();
    let mut bytes = Vec::new();
    class_file.to_bytes(&mut bytes).unwrap();

    let config = TransformerConfig::disabled();
    let reporter = ErrorReporter::new();
    let transformed = transform_class("com.x.MainActivity", &bytes, &config, &reporter);

    assert_eq!(transformed, bytes);
    assert!(reporter.is_empty());
}
