/*!
 * Sample documents from the STJ format documentation
 *
 * Every valid sample must produce an empty issue list; every invalid sample
 * must produce the documented finding.
 */

use serde_json::json;
use stj_validator::app_config::ValidationConfig;
use stj_validator::{
    validate, validate_fail_fast, RuleKind, Severity, ValidationError, ValidationService,
};
use crate::common;

const VALID_SAMPLES: &[&str] = &[
    "valid/basic.stj.json",
    "valid/metadata.stj.json",
    "valid/languages_metadata.stj.json",
    "valid/speakers.stj.json",
    "valid/segments.stj.json",
    "valid/multilingual.stj.json",
    "valid/styles.stj.json",
    "valid/word_alignment.stj.json",
    "valid/extensions.stj.json",
    "valid/complex_multilingual.stj.json",
    "valid/confidence_threshold.stj.json",
    "valid/srt_style.stj.json",
    "valid/webvtt_style.stj.json",
    "valid/ttml_style.stj.json",
    "valid/extensibility.stj.json",
];

/// Test that every valid sample yields no issues at all
#[test]
fn test_validSamples_shouldYieldNoIssues() {
    for sample in VALID_SAMPLES {
        let report = validate(&common::load_resource(sample)).unwrap();
        assert!(report.is_empty(), "{} produced issues: {:?}", sample, report.issues);
    }
}

#[test]
fn test_validSamples_inFailFastMode_shouldSucceed() {
    for sample in VALID_SAMPLES {
        assert!(
            validate_fail_fast(&common::load_resource(sample)).is_ok(),
            "{} failed in fail-fast mode",
            sample
        );
    }
}

/// Test that free-form data outside extensions does not invalidate a document
#[test]
fn test_complexMultilingualSample_withAdditionalInfo_shouldBeValid() {
    let sample = common::load_resource("valid/complex_multilingual.stj.json");
    assert!(sample["stj"]["metadata"]["additional_info"].is_object());

    let report = validate(&sample).unwrap();

    assert!(report.is_valid());
    assert!(report.is_empty(), "{:?}", report.issues);
}

#[test]
fn test_confidenceSample_withAdvisories_shouldWarnButStayValid() {
    let service = ValidationService::with_config(ValidationConfig {
        confidence_advisories: true,
        ..Default::default()
    })
    .unwrap();

    let report = service
        .validate_value(&common::load_resource("valid/confidence_threshold.stj.json"))
        .unwrap();

    assert!(report.is_valid());
    assert!(!report.is_empty());
    assert!(report.issues.iter().all(|i| i.severity == Severity::Warning));
    assert!(report.issues.iter().all(|i| i.rule() == Some(RuleKind::ConfidenceThreshold)));
    assert!(report.issues[0].path.starts_with("transcript.segments[1]"));
}

#[test]
fn test_uriSamples_shouldAllBeAccepted() {
    let uris = [
        "http://example.com/media/video.mp4",
        "https://example.com/media/audio.mp3",
        "file:///C:/Media/video.mp4",
        "file:///home/user/media/audio.mp3",
        "s3://bucket-name/path/to/object",
    ];

    for uri in uris {
        let doc = json!({"stj": {
            "version": "0.6.0",
            "metadata": {"source": {"uri": uri}},
            "transcript": {"segments": [{"text": "Hello"}]}
        }});
        let report = validate(&doc).unwrap();
        assert!(report.is_empty(), "{} produced issues: {:?}", uri, report.issues);
    }
}

#[test]
fn test_relativeUri_shouldBeRejected() {
    let doc = json!({"stj": {
        "version": "0.6.0",
        "metadata": {"source": {"uri": "media/video.mp4"}},
        "transcript": {"segments": [{"text": "Hello"}]}
    }});

    let report = validate(&doc).unwrap();

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].path, "metadata.source.uri");
}

#[test]
fn test_invalidRootStructures_shouldBeRejected() {
    // Missing mandatory fields
    let report = validate(&json!({"stj": {}})).unwrap();
    let paths: Vec<&str> = report.errors().map(|i| i.path.as_str()).collect();
    assert_eq!(paths, vec!["version", "transcript"]);

    // Missing transcript
    assert!(!validate(&json!({"stj": {"version": "0.6.0"}})).unwrap().is_valid());

    // Missing stj root object
    assert!(matches!(
        validate(&json!({"version": "0.6.0", "transcript": {}})),
        Err(ValidationError::Malformed(_))
    ));
}

#[test]
fn test_overlappingSample_shouldReportOneOverlap() {
    let report = validate(&common::load_resource("invalid/overlapping_segments.stj.json")).unwrap();

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].rule(), Some(RuleKind::SegmentOrder));
    assert_eq!(report.issues[0].path, "transcript.segments[1]");
}

#[test]
fn test_reservedNamespaceSample_shouldReportOnce() {
    let report = validate(&common::load_resource("invalid/reserved_namespace.stj.json")).unwrap();

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].path, "metadata.extensions.stj");
}

#[test]
fn test_emptySegmentsSample_shouldBeInvalid() {
    let report = validate(&common::load_resource("invalid/empty_segments.stj.json")).unwrap();

    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].path, "transcript.segments");
    assert_eq!(report.issues[0].severity, Severity::Error);
}

/// Test that a document with problems in both phases lists them in order
#[test]
fn test_severalProblemsSample_shouldListStructuralThenSemantic() {
    let report = validate(&common::load_resource("invalid/several_problems.stj.json")).unwrap();

    let structural: Vec<&str> = report.structural_issues().iter().map(|i| i.path.as_str()).collect();
    assert_eq!(structural, vec!["version", "metadata.confidence_threshold"]);
    assert!(report.structural_issues()[0].message.contains("Unsupported STJ version"));

    let rules: Vec<RuleKind> = report.semantic_issues().iter().filter_map(|i| i.rule()).collect();
    assert_eq!(
        rules,
        vec![
            RuleKind::WordText,
            RuleKind::ZeroDuration,
            RuleKind::References,
            RuleKind::LanguageCodes,
        ]
    );
    assert!(report.semantic_issues()[1].message.contains("7.0"));
    assert!(report.semantic_issues()[2].message.contains("'Speaker9'"));
}
