/*!
 * Tests for the document model and both validation phases
 */

use serde_json::json;
use stj_validator::app_config::{UnknownProperties, ValidationConfig};
use stj_validator::document::Document;
use stj_validator::validation::issue::IssueSource;
use stj_validator::validation::{SemanticEngine, SemanticRule, StructuralValidator};
use stj_validator::{Issue, RuleKind, Severity, ValidationReport, WordTimingMode};
use crate::common;

/// Test that the document model exposes the parsed tree read-only
#[test]
fn test_document_fromValue_shouldExposeEntities() {
    let doc = Document::from_value(&common::load_resource("valid/segments.stj.json")).unwrap();

    assert_eq!(doc.version.as_deref(), Some("0.6.0"));
    assert_eq!(doc.segments().len(), 3);
    assert_eq!(doc.speakers().len(), 3);
    assert!(doc.styles().is_empty());
    assert_eq!(
        doc.speaker("Speaker2").and_then(|s| s.name.as_deref()),
        Some("Speaker Two")
    );

    let first = &doc.segments()[0];
    assert_eq!(first.timing(), Some((0.0, 5.0)));
    assert_eq!(first.words().len(), 4);
    assert_eq!(first.effective_word_timing_mode(), Some(WordTimingMode::Complete));
    assert!(doc.segments()[2].is_zero_duration);
}

#[test]
fn test_document_withWrongFieldTypes_shouldHoldThemAsAbsent() {
    let doc = Document::from_value(&json!({"stj": {
        "version": 6,
        "transcript": {"segments": [
            "not an object",
            {"start": "zero", "end": 1.0, "text": "kept"}
        ]}
    }}))
    .unwrap();

    assert_eq!(doc.version, None);
    assert_eq!(doc.segments().len(), 1);
    assert_eq!(doc.segments()[0].index, 1);
    assert_eq!(doc.segments()[0].start, None);
}

#[test]
fn test_document_fromJsonStr_withBadRoot_shouldFail() {
    assert!(Document::from_json_str("42").is_err());
    assert!(Document::from_json_str(r#"{"stj": []}"#).is_err());
    assert!(Document::from_json_str(r#"{"version": "0.6.0", "transcript": {}}"#).is_err());
}

/// Test structural issues come back in traversal order with paths
#[test]
fn test_structural_withSeveralProblems_shouldFollowTraversalOrder() {
    let issues = StructuralValidator::new()
        .validate(&json!({
            "extra": 1,
            "stj": {
                "version": "0.6",
                "metadata": {"confidence_threshold": 1.5},
                "transcript": {"segments": [
                    {"start": -1.0, "end": 2.0, "text": "a", "word_timing_mode": "sometimes"}
                ]}
            }
        }))
        .unwrap();
    let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();

    assert_eq!(
        paths,
        vec![
            "extra",
            "version",
            "metadata.confidence_threshold",
            "transcript.segments[0].start",
            "transcript.segments[0].word_timing_mode",
        ]
    );
    assert!(issues.iter().all(|i| i.source == IssueSource::Structural));
}

#[test]
fn test_structural_withUnknownPropertySeverityWarning_shouldDowngrade() {
    let config = ValidationConfig {
        unknown_properties: UnknownProperties::Warning,
        ..Default::default()
    };
    let validator = StructuralValidator::with_config(&config).unwrap();

    let issues = validator
        .validate(&json!({"stj": {
            "version": "0.6.0",
            "metadata": {"additional_info": {"project": "x"}},
            "transcript": {"segments": [{"text": "a"}]}
        }}))
        .unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path, "metadata.additional_info");
    assert_eq!(issues[0].severity, Severity::Warning);
}

#[test]
fn test_structural_withEmptyText_shouldRequireZeroDurationFlag() {
    let validator = StructuralValidator::new();
    let unflagged = json!({"stj": {"version": "0.6.0", "transcript": {"segments": [
        {"start": 1.0, "end": 1.0, "text": ""}
    ]}}});
    let flagged = json!({"stj": {"version": "0.6.0", "transcript": {"segments": [
        {"start": 1.0, "end": 1.0, "text": "", "is_zero_duration": true}
    ]}}});

    assert_eq!(validator.validate(&unflagged).unwrap().len(), 1);
    assert!(validator.validate(&flagged).unwrap().is_empty());
}

struct ShortTextRule;

impl SemanticRule for ShortTextRule {
    fn kind(&self) -> RuleKind {
        RuleKind::WordText
    }

    fn check(&self, document: &Document) -> Vec<Issue> {
        document
            .segments()
            .iter()
            .filter(|s| s.text.as_deref().is_some_and(|t| t.len() < 3))
            .map(|s| {
                Issue::semantic(
                    self.kind(),
                    format!("transcript.segments[{}].text", s.index),
                    "Text is very short",
                )
                .as_warning()
            })
            .collect()
    }
}

/// Test that the engine accepts externally defined rules
#[test]
fn test_engine_withCustomRule_shouldRunIt() {
    let engine = SemanticEngine::with_rules(vec![Box::new(ShortTextRule)]);
    let doc = Document::from_value(&json!({"stj": {"version": "0.6.0", "transcript": {"segments": [
        {"text": "ok"}, {"text": "longer"}
    ]}}}))
    .unwrap();

    let issues = engine.run(&doc);

    assert_eq!(engine.rule_kinds(), vec![RuleKind::WordText]);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path, "transcript.segments[0].text");
    assert!(engine.run_until_error(&doc).is_ok());
}

#[test]
fn test_issue_display_shouldRenderPathAndMessage() {
    let issue = Issue::semantic(RuleKind::References, "transcript.segments[1].speaker_id", "unknown");
    assert_eq!(issue.to_string(), "transcript.segments[1].speaker_id: unknown");
    assert_eq!(Issue::structural("", "bad root").to_string(), "root: bad root");
}

#[test]
fn test_report_serialized_shouldTagPhaseAndRule() {
    let report = ValidationReport::merge(
        vec![Issue::structural("version", "missing")],
        vec![Issue::semantic(RuleKind::SegmentOrder, "transcript.segments[1]", "overlap")],
    );

    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["issues"][0]["severity"], "error");
    assert_eq!(value["issues"][0]["source"]["phase"], "structural");
    assert_eq!(value["issues"][1]["source"]["rule"], "segment_order");
}

#[test]
fn test_ruleKind_parse_shouldAcceptEveryName() {
    for kind in RuleKind::ALL {
        assert_eq!(kind.as_str().parse::<RuleKind>().unwrap(), kind);
    }
    assert!("bogus".parse::<RuleKind>().is_err());
}
