//! End-to-end scenarios composing the filter, classifier, strategy, annotation extractor, and
//! visitors the way [`annotation_weaver::transform::transform_class`] does internally, but
//! against the mock instruction factory so they exercise the full decision pipeline without
//! needing real class-file bytes.

use annotation_weaver::annotations::{AnnotationValue, ParsedAnnotation};
use annotation_weaver::bytecode::mock::{MockFactory, MockInsn};
use annotation_weaver::bytecode::JvmType;
use annotation_weaver::config::TransformerConfig;
use annotation_weaver::model::{ClassType, ParamEntry, TrackMetadata};
use annotation_weaver::visitor::{helper, lifecycle, track};
use annotation_weaver::{annotations, classifier, filter, strategy};

const TRACK_SCREEN_DESCRIPTOR: &str = "Lcom/shalan/analytics/annotation/TrackScreen;";
const TRACK_DESCRIPTOR: &str = "Lcom/shalan/analytics/annotation/Track;";

#[test]
fn scenario_1_activity_with_track_screen() {
    let class_type = classifier::classify(Some("androidx/appcompat/app/AppCompatActivity"));
    assert_eq!(class_type, ClassType::Activity);

    let decision = strategy::decide(class_type, "onCreate", "(Landroid/os/Bundle;)V");
    assert!(decision.should_instrument());

    let track_screen = ParsedAnnotation::new(TRACK_SCREEN_DESCRIPTOR)
        .with_member("screenName", AnnotationValue::String("Home".to_string()));
    let (meta, _) = annotations::extract_class_metadata("com/x/MainActivity", &[track_screen], &mut Vec::new());
    let meta = meta.unwrap();

    let mut factory = MockFactory;
    let original_body = vec![
        MockInsn::Aload0,
        MockInsn::Opaque("aload_1"),
        MockInsn::InvokeSpecial(
            "androidx/appcompat/app/AppCompatActivity".to_string(),
            "onCreate".to_string(),
            "(Landroid/os/Bundle;)V".to_string(),
        ),
        MockInsn::ReturnVoid,
    ];
    let (rewritten, injected) = lifecycle::inject_after_super_call(&mut factory, "com/x/MainActivity", &original_body, |insn| {
        matches!(insn, MockInsn::InvokeSpecial(_, name, descriptor)
            if name == "onCreate" && descriptor == "(Landroid/os/Bundle;)V")
    })
    .unwrap();
    assert!(injected);
    assert_eq!(
        rewritten,
        vec![
            MockInsn::Aload0,
            MockInsn::Opaque("aload_1"),
            MockInsn::InvokeSpecial(
                "androidx/appcompat/app/AppCompatActivity".to_string(),
                "onCreate".to_string(),
                "(Landroid/os/Bundle;)V".to_string(),
            ),
            MockInsn::Aload0,
            MockInsn::InvokeSpecial(
                "com/x/MainActivity".to_string(),
                "__injectAnalyticsTracking".to_string(),
                "()V".to_string(),
            ),
            MockInsn::ReturnVoid,
        ]
    );

    let screen_name = meta.effective_screen_name("MainActivity");
    let screen_class = meta.effective_screen_class("MainActivity");
    assert_eq!(screen_name, "Home");
    assert_eq!(screen_class, "MainActivity");

    let helper_body = helper::build_helper_method_body(&mut factory, &screen_name, &screen_class).unwrap();
    assert_eq!(helper_body[1], MockInsn::LdcString("Home".to_string()));
    assert_eq!(helper_body[2], MockInsn::LdcString("MainActivity".to_string()));
}

#[test]
fn scenario_2_track_with_params() {
    let config = TransformerConfig::new();
    let track_annotation = ParsedAnnotation::new(TRACK_DESCRIPTOR)
        .with_member("eventName", AnnotationValue::String("e1".to_string()));
    let param_user = vec![ParsedAnnotation::new("Lcom/shalan/analytics/annotation/Param;")
        .with_member("value", AnnotationValue::String("user_id".to_string()))];
    let param_ts = vec![ParsedAnnotation::new("Lcom/shalan/analytics/annotation/Param;")
        .with_member("value", AnnotationValue::String("ts".to_string()))];

    let meta = track::absorb_track_metadata("doIt", &[track_annotation], &[param_user, param_ts], &config).unwrap();
    assert_eq!(meta.event_name, "e1");

    let slots = [
        annotation_weaver::descriptor::ParsedParameter { jvm_type: JvmType::Reference, local_slot: 1 },
        annotation_weaver::descriptor::ParsedParameter { jvm_type: JvmType::Long, local_slot: 2 },
    ];
    let mut factory = MockFactory;
    let prelude = track::build_track_prelude(&mut factory, &meta, &slots, config.max_parameters_per_method).unwrap();

    assert_eq!(prelude.first(), Some(&MockInsn::LdcString("e1".to_string())));
    assert!(prelude.contains(&MockInsn::LoadParam(JvmType::Reference, 1)));
    assert!(prelude.contains(&MockInsn::LoadParam(JvmType::Long, 2)));
    assert!(prelude.contains(&MockInsn::BoxPrimitive(JvmType::Long)));
    assert_eq!(prelude.last(), Some(&MockInsn::InvokeStatic(
        "com/shalan/analytics/core/MethodTrackingManager".to_string(),
        "track".to_string(),
        "(Ljava/lang/String;Ljava/util/Map;Z)V".to_string(),
    )));
}

#[test]
fn scenario_3_disabled_method_tracking_skips_absorption() {
    let config = TransformerConfig::new().with_method_tracking_enabled(false);
    let track_annotation = ParsedAnnotation::new(TRACK_DESCRIPTOR)
        .with_member("eventName", AnnotationValue::String("e1".to_string()));
    assert!(track::absorb_track_metadata("doIt", &[track_annotation], &[], &config).is_none());
}

#[test]
fn scenario_4_excluded_class_vs_non_subpackage_name_collision() {
    let config = TransformerConfig::new().with_exclude_packages(["com.x.debug."]);
    assert!(filter::is_instrumentable("com.x.Debug", &config));
    assert!(!filter::is_instrumentable("com.x.debug.Foo", &config));
}

#[test]
fn scenario_5_fragment_with_track_screen() {
    let class_type = classifier::classify(Some("androidx/fragment/app/Fragment"));
    assert_eq!(class_type, ClassType::Fragment);
    let decision = strategy::decide(class_type, "onViewCreated", "(Landroid/view/View;Landroid/os/Bundle;)V");
    assert!(decision.should_instrument());

    let track_screen = ParsedAnnotation::new(TRACK_SCREEN_DESCRIPTOR)
        .with_member("screenName", AnnotationValue::String("Prof".to_string()))
        .with_member("screenClass", AnnotationValue::String("P".to_string()));
    let (meta, _) = annotations::extract_class_metadata("com/x/ProfileFragment", &[track_screen], &mut Vec::new());
    let meta = meta.unwrap();
    assert_eq!(meta.effective_screen_name("ProfileFragment"), "Prof");
    assert_eq!(meta.effective_screen_class("ProfileFragment"), "P");
}

#[test]
fn scenario_6_parameter_cap_keeps_first_n_in_source_order() {
    let track = TrackMetadata {
        event_name: "e1".to_string(),
        include_global_params: true,
        params: (0..12).map(|i| ParamEntry { index: i, name: format!("p{i}") }).collect(),
    };
    let slots: Vec<_> =
        (0..12).map(|i| annotation_weaver::descriptor::ParsedParameter { jvm_type: JvmType::Int, local_slot: i + 1 }).collect();

    let mut factory = MockFactory;
    let prelude = track::build_track_prelude(&mut factory, &track, &slots, 3).unwrap();
    let put_count = prelude.iter().filter(|i| matches!(i, MockInsn::InvokeInterface(owner, name, _) if owner == "java/util/Map" && name == "put")).count();
    assert_eq!(put_count, 3);

    let names: Vec<&str> = prelude
        .iter()
        .filter_map(|i| match i {
            MockInsn::LdcString(s) if s.starts_with('p') => Some(s.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["p0", "p1", "p2"]);
}
