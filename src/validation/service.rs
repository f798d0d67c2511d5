/*!
 * Validation service that orchestrates both validation phases.
 *
 * The structural phase runs against the raw data tree, then the document
 * model is built and handed to the semantic engine. The aggregator merges
 * both phases according to the configured mode.
 */

use anyhow::Result;
use log::debug;
use serde_json::Value;

use crate::app_config::ValidationConfig;
use crate::document::model::{decode_json, Document};
use crate::errors::ValidationError;

use super::issue::Issue;
use super::report::{ValidationMode, ValidationReport};
use super::semantic::SemanticEngine;
use super::structural::StructuralValidator;

/// Validation service for STJ documents
pub struct ValidationService {
    config: ValidationConfig,
    structural: StructuralValidator,
    engine: SemanticEngine,
}

impl ValidationService {
    /// Create a new validation service with default configuration
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
            structural: StructuralValidator::new(),
            engine: SemanticEngine::new(),
        }
    }

    /// Create a new validation service with custom configuration
    pub fn with_config(config: ValidationConfig) -> Result<Self> {
        let structural = StructuralValidator::with_config(&config)?;
        // Reject unknown rule names up front
        config.disabled_rule_kinds()?;
        let engine = SemanticEngine::with_config(&config);

        Ok(Self {
            config,
            structural,
            engine,
        })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a raw JSON string
    pub fn validate_str(&self, input: &str) -> Result<ValidationReport, ValidationError> {
        let value = decode_json(input)?;
        self.validate_value(&value)
    }

    /// Validate a decoded data tree of the form `{"stj": {...}}`
    ///
    /// Collect mode returns every issue. Fail-fast mode returns
    /// `ValidationError::Failed` carrying the first error-severity issue the
    /// collect run would have listed first.
    pub fn validate_value(&self, value: &Value) -> Result<ValidationReport, ValidationError> {
        let structural = self.structural.validate(value)?;
        let structural_errors = structural.iter().filter(|i| i.is_error()).count();

        if self.config.mode == ValidationMode::FailFast {
            if let Some(issue) = structural.iter().find(|i| i.is_error()) {
                return Err(ValidationError::Failed(issue.clone()));
            }
        }

        if structural_errors > 0 && !self.config.permissive {
            debug!(
                "Skipping semantic checks: {} structural errors",
                structural_errors
            );
            return Ok(ValidationReport::structural_only(structural));
        }

        let document = Document::from_value(value)?;
        let semantic = self.run_semantic(&document)?;

        let report = ValidationReport::merge(structural, semantic);
        debug!("{}", report.summary());
        Ok(report)
    }

    /// Run only the semantic phase over an already-built document
    ///
    /// The structural phase needs the raw data tree, so its checks are not
    /// repeated here; the report's `structural_count` is always zero.
    pub fn validate_document(&self, document: &Document) -> Result<ValidationReport, ValidationError> {
        let semantic = self.run_semantic(document)?;
        Ok(ValidationReport::merge(Vec::new(), semantic))
    }

    fn run_semantic(&self, document: &Document) -> Result<Vec<Issue>, ValidationError> {
        match self.config.mode {
            ValidationMode::Collect => Ok(self.engine.run(document)),
            ValidationMode::FailFast => self
                .engine
                .run_until_error(document)
                .map_err(ValidationError::Failed),
        }
    }
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a data tree in collect mode with default settings
pub fn validate(value: &Value) -> Result<ValidationReport, ValidationError> {
    ValidationService::new().validate_value(value)
}

/// Validate a data tree, raising on the first error-severity issue
pub fn validate_fail_fast(value: &Value) -> Result<ValidationReport, ValidationError> {
    let service = ValidationService {
        config: ValidationConfig {
            mode: ValidationMode::FailFast,
            ..ValidationConfig::default()
        },
        structural: StructuralValidator::new(),
        engine: SemanticEngine::new(),
    };
    service.validate_value(value)
}
