/*!
 * Integration tests for validating STJ files on disk
 */

use anyhow::Result;
use std::path::PathBuf;

use stj_validator::app_config::{Config, ValidationConfig};
use stj_validator::file_utils::FileManager;
use stj_validator::{AppError, ValidationError, ValidationMode, ValidationReport, ValidationService};
use crate::common;

fn validate_path(service: &ValidationService, path: &PathBuf) -> Result<ValidationReport, AppError> {
    let value = FileManager::read_json(path)?;
    Ok(service.validate_value(&value)?)
}

/// Test the full workflow: config file, directory discovery, validation
#[test]
fn test_workflow_withDirectory_shouldValidateEveryFile() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();

    common::create_test_stj(root, "good/first.stj.json")?;
    common::create_test_stj(root, "good/second.stj.json")?;
    common::create_test_file(
        root,
        "bad/overlap.stj.json",
        &std::fs::read_to_string(common::test_resource_path("invalid/overlapping_segments.stj.json"))?,
    )?;
    common::create_test_file(root, "conf.json", r#"{"validation": {"mode": "collect"}}"#)?;

    let config = Config::load_or_default(root.join("conf.json"))?;
    let service = ValidationService::with_config(config.validation)?;
    let files = FileManager::collect_inputs(&[root.to_path_buf()])?;

    assert_eq!(files.len(), 3);

    let mut valid = 0;
    let mut invalid = Vec::new();
    for file in &files {
        let report = validate_path(&service, file)?;
        if report.is_valid() {
            valid += 1;
        } else {
            invalid.push(file.clone());
        }
    }

    assert_eq!(valid, 2);
    assert_eq!(invalid, vec![root.join("bad/overlap.stj.json")]);
    Ok(())
}

/// Test that a truncated file surfaces as malformed input, not as an issue
#[test]
fn test_workflow_withTruncatedFile_shouldReportMalformedInput() -> Result<()> {
    let service = ValidationService::new();
    let path = common::test_resource_path("invalid/truncated.stj.json");

    match validate_path(&service, &path) {
        Err(AppError::Malformed(_)) => {}
        other => panic!("expected malformed input, got {:?}", other.map(|r| r.summary())),
    }
    Ok(())
}

#[test]
fn test_workflow_withFailFastConfig_shouldStopAtFirstError() -> Result<()> {
    common::init_test_logger();
    let service = ValidationService::with_config(ValidationConfig {
        mode: ValidationMode::FailFast,
        ..Default::default()
    })?;
    let collect = ValidationService::new();
    let path = common::test_resource_path("invalid/several_problems.stj.json");

    let collected = validate_path(&collect, &path)?;
    match validate_path(&service, &path) {
        Err(AppError::Validation(ValidationError::Failed(issue))) => {
            assert_eq!(Some(&issue), collected.first_error());
            assert_eq!(issue.path, "version");
        }
        other => panic!("expected fail-fast error, got {:?}", other.map(|r| r.summary())),
    }
    Ok(())
}

#[test]
fn test_workflow_withStrictConfig_shouldSkipSemanticChecks() -> Result<()> {
    let service = ValidationService::with_config(ValidationConfig {
        permissive: false,
        ..Default::default()
    })?;
    let path = common::test_resource_path("invalid/several_problems.stj.json");

    let report = validate_path(&service, &path)?;

    assert!(report.semantic_skipped);
    assert_eq!(report.issues.len(), 2);
    assert!(report.summary().ends_with("semantic checks skipped"));
    Ok(())
}

#[test]
fn test_workflow_withDisabledRules_shouldOmitTheirIssues() -> Result<()> {
    let service = ValidationService::with_config(ValidationConfig {
        disabled_rules: vec!["references".to_string(), "language_codes".to_string()],
        ..Default::default()
    })?;
    let path = common::test_resource_path("invalid/several_problems.stj.json");

    let report = validate_path(&service, &path)?;

    assert_eq!(report.semantic_count, 2);
    Ok(())
}

#[test]
fn test_workflow_runTwice_shouldBeDeterministic() -> Result<()> {
    let service = ValidationService::new();
    let path = common::test_resource_path("invalid/several_problems.stj.json");

    let first = validate_path(&service, &path)?;
    let second = validate_path(&service, &path)?;

    assert_eq!(first.messages(), second.messages());
    assert_eq!(first, second);
    Ok(())
}
