/*!
 * Tests for error types and conversions
 */

use stj_validator::errors::{AppError, MalformedInputError, ValidationError};
use stj_validator::Issue;

#[test]
fn test_malformedInputError_shouldDisplayCorrectly() {
    assert_eq!(
        MalformedInputError::MissingStjRoot.to_string(),
        "Missing 'stj' root object"
    );
    assert_eq!(
        MalformedInputError::RootNotObject { found: "array" }.to_string(),
        "Root must be a JSON object, found array"
    );
    assert!(MalformedInputError::Decode("EOF while parsing".to_string())
        .to_string()
        .contains("EOF while parsing"));
}

#[test]
fn test_validationError_failed_shouldCarryIssue() {
    let issue = Issue::structural("transcript.segments", "Field 'segments' must contain at least one segment");
    let error = ValidationError::Failed(issue.clone());

    assert_eq!(error.issue(), Some(&issue));
    let display = error.to_string();
    assert!(display.contains("transcript.segments"));
    assert!(display.contains("at least one segment"));
}

#[test]
fn test_validationError_fromMalformed_shouldHaveNoIssue() {
    let error: ValidationError = MalformedInputError::MissingStjRoot.into();
    assert!(error.issue().is_none());
    assert!(error.to_string().contains("Malformed input"));
}

#[test]
fn test_appError_conversions_shouldWrapSource() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
    assert!(app_error.to_string().contains("file not found"));

    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(_)));

    let app_error: AppError = MalformedInputError::MissingStjRoot.into();
    assert!(matches!(app_error, AppError::Malformed(_)));

    let app_error: AppError = ValidationError::Failed(Issue::structural("version", "missing")).into();
    assert!(app_error.to_string().starts_with("Validation error"));
}
