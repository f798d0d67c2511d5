/*!
 * Issue aggregation.
 *
 * Structural issues come first, in document-traversal order, followed by
 * semantic issues in rule-declaration order. The same input always yields
 * the same list in the same order.
 */

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

use super::issue::{Issue, IssueSource, Severity};

/// How the aggregator reports findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Never raise; return every issue
    #[default]
    Collect,
    /// Raise on the first error-severity issue
    FailFast,
}

/// Complete validation report for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// All issues, structural first
    pub issues: Vec<Issue>,
    /// Number of structural issues at the front of `issues`
    pub structural_count: usize,
    /// Number of semantic issues after the structural ones
    pub semantic_count: usize,
    /// Whether the semantic phase was skipped because of structural errors
    pub semantic_skipped: bool,
}

impl ValidationReport {
    /// Merge the two phases into one ordered report
    pub fn merge(structural: Vec<Issue>, semantic: Vec<Issue>) -> Self {
        let structural_count = structural.len();
        let semantic_count = semantic.len();
        let mut issues = structural;
        issues.extend(semantic);

        Self {
            issues,
            structural_count,
            semantic_count,
            semantic_skipped: false,
        }
    }

    /// A report whose semantic phase did not run
    pub fn structural_only(structural: Vec<Issue>) -> Self {
        let mut report = Self::merge(structural, Vec::new());
        report.semantic_skipped = true;
        report
    }

    /// True when no error-severity issue was found
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(Issue::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn structural_issues(&self) -> &[Issue] {
        self.split_phases().0
    }

    pub fn semantic_issues(&self) -> &[Issue] {
        self.split_phases().1
    }

    // `structural_count` is public, so clamp it to the list
    fn split_phases(&self) -> (&[Issue], &[Issue]) {
        self.issues.split_at(self.structural_count.min(self.issues.len()))
    }

    /// First issue in report order that fail-fast mode would raise
    pub fn first_error(&self) -> Option<&Issue> {
        self.issues.iter().find(|i| i.is_error())
    }

    /// Convert into the fail-fast outcome
    pub fn into_result(self) -> Result<Self, ValidationError> {
        match self.first_error() {
            Some(issue) => Err(ValidationError::Failed(issue.clone())),
            None => Ok(self),
        }
    }

    /// Issue messages only, in order
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.to_string()).collect()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let errors = self.errors().count();
        let warnings = self.warnings().count();
        let structural = self
            .issues
            .iter()
            .filter(|i| i.source == IssueSource::Structural)
            .count();
        format!(
            "Validation: {} errors, {} warnings ({} structural, {} semantic){}",
            errors,
            warnings,
            structural,
            self.issues.len() - structural,
            if self.semantic_skipped { ", semantic checks skipped" } else { "" }
        )
    }
}
