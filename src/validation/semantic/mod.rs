/*!
 * Semantic rule engine.
 *
 * Each rule receives the whole document and returns its own findings; rules
 * never see each other's output and never stop each other. The engine runs
 * them in declaration order:
 *
 * - `ordering`: segment order/overlap, segment timing, word timing
 * - `words`: word/segment text consistency, zero-duration flags
 * - `references`: speaker/style references, unique ids
 * - `languages`: ISO 639 code validity and consistency
 * - `confidence`: advisory confidence-threshold signal
 * - `namespaces`: reserved extension namespace
 */

pub mod confidence;
pub mod languages;
pub mod namespaces;
pub mod ordering;
pub mod references;
pub mod words;

use log::{debug, trace};

use crate::app_config::ValidationConfig;
use crate::document::model::{Document, Segment, Word};

use super::issue::{child_path, item_path, Issue, RuleKind};

pub use confidence::ConfidenceThresholdRule;
pub use languages::LanguageCodeRule;
pub use namespaces::ReservedNamespaceRule;
pub use ordering::{SegmentOrderRule, SegmentTimingRule, WordTimingRule};
pub use references::{ReferenceIntegrityRule, UniqueIdRule};
pub use words::{WordTextRule, ZeroDurationRule};

pub(crate) const SEGMENTS_PATH: &str = "transcript.segments";
pub(crate) const SPEAKERS_PATH: &str = "transcript.speakers";
pub(crate) const STYLES_PATH: &str = "transcript.styles";

pub(crate) fn segment_path(segment: &Segment) -> String {
    item_path(SEGMENTS_PATH, segment.index)
}

pub(crate) fn segment_field_path(segment: &Segment, field: &str) -> String {
    child_path(&segment_path(segment), field)
}

pub(crate) fn word_path(segment: &Segment, word: &Word) -> String {
    item_path(&segment_field_path(segment, "words"), word.index)
}

/// A context-dependent check over a whole document
pub trait SemanticRule: Send + Sync {
    /// Which rule this is
    fn kind(&self) -> RuleKind;

    /// Inspect the document and return every finding
    fn check(&self, document: &Document) -> Vec<Issue>;
}

/// Runs semantic rules in declaration order
pub struct SemanticEngine {
    rules: Vec<Box<dyn SemanticRule>>,
}

impl SemanticEngine {
    /// Create an engine with every rule enabled and default settings
    pub fn new() -> Self {
        Self::with_config(&ValidationConfig::default())
    }

    /// Create an engine honoring `disabled_rules` and rule settings
    pub fn with_config(config: &ValidationConfig) -> Self {
        let rules = RuleKind::ALL
            .iter()
            .filter(|kind| config.is_rule_enabled(**kind))
            .map(|kind| build_rule(*kind, config))
            .collect();

        Self { rules }
    }

    /// Create an engine from an explicit rule list
    pub fn with_rules(rules: Vec<Box<dyn SemanticRule>>) -> Self {
        Self { rules }
    }

    /// Kinds of the rules this engine runs, in order
    pub fn rule_kinds(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Run every rule and concatenate the findings
    pub fn run(&self, document: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            let found = rule.check(document);
            trace!("Rule {}: {} issues", rule.kind(), found.len());
            issues.extend(found);
        }

        debug!(
            "Semantic validation: {} rules, {} issues",
            self.rules.len(),
            issues.len()
        );
        issues
    }

    /// Run rules until one reports an error; warnings before it are returned
    pub fn run_until_error(&self, document: &Document) -> Result<Vec<Issue>, Issue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            for issue in rule.check(document) {
                if issue.is_error() {
                    debug!("Fail-fast: rule {} raised {}", rule.kind(), issue);
                    return Err(issue);
                }
                issues.push(issue);
            }
        }
        Ok(issues)
    }
}

impl Default for SemanticEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn build_rule(kind: RuleKind, config: &ValidationConfig) -> Box<dyn SemanticRule> {
    match kind {
        RuleKind::SegmentOrder => Box::new(SegmentOrderRule),
        RuleKind::WordText => Box::new(WordTextRule),
        RuleKind::ZeroDuration => Box::new(ZeroDurationRule),
        RuleKind::References => Box::new(ReferenceIntegrityRule),
        RuleKind::LanguageCodes => Box::new(LanguageCodeRule),
        RuleKind::ConfidenceThreshold => Box::new(ConfidenceThresholdRule {
            emit_advisories: config.confidence_advisories,
        }),
        RuleKind::ReservedNamespace => Box::new(ReservedNamespaceRule),
        RuleKind::SegmentTiming => Box::new(SegmentTimingRule),
        RuleKind::WordTiming => Box::new(WordTimingRule),
        RuleKind::UniqueIds => Box::new(UniqueIdRule),
    }
}
