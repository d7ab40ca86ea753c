//! Exercises [`ErrorReporter`] the way a driver shares one across many `transform_class` calls:
//! constructed once, cloned cheaply, and queried for a summary at the end of a build.

use annotation_weaver::annotations::{self, AnnotationValue, ParsedAnnotation};
use annotation_weaver::{ErrorReporter, TransformErrorKind};

#[test]
fn errors_from_independent_classes_accumulate_in_one_reporter() {
    let reporter = ErrorReporter::new();
    let driver_handle = reporter.clone();

    let malformed = ParsedAnnotation::new("Lcom/shalan/analytics/annotation/TrackScreen;")
        .with_member("screenName", AnnotationValue::Int(7));
    let mut errors_a = Vec::new();
    annotations::extract_class_metadata("com/x/MainActivity", &[malformed.clone()], &mut errors_a);
    for error in errors_a {
        reporter.report(error);
    }

    let mut errors_b = Vec::new();
    annotations::extract_class_metadata("com/x/ProfileFragment", &[malformed], &mut errors_b);
    for error in errors_b {
        driver_handle.report(error);
    }

    assert_eq!(reporter.len(), 2);
    let snapshot = reporter.snapshot();
    assert!(snapshot.iter().all(|e| e.kind == TransformErrorKind::AnnotationScan));

    let summary = reporter.report_summary();
    assert!(summary.contains("com/x/MainActivity"));
    assert!(summary.contains("com/x/ProfileFragment"));
    assert!(summary.contains("2 transformation error(s) across 2 class(es)"));
}

#[test]
fn a_clean_build_reports_an_empty_summary() {
    let reporter = ErrorReporter::new();
    assert!(reporter.is_empty());
    assert_eq!(reporter.report_summary(), "no transformation errors");
}
