/*!
 * Issue types shared by the structural validator and the semantic rules.
 *
 * An issue names the offending field path (relative to the `stj` root
 * object, e.g. `transcript.segments[2].start`), a human-readable message and
 * a severity. Issues are plain data: rules return them, nothing throws.
 */

use serde::{Deserialize, Serialize};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Document is still valid, but something looks off
    Warning,
    /// Document does not conform
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Semantic rules, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    SegmentOrder,
    WordText,
    ZeroDuration,
    References,
    LanguageCodes,
    ConfidenceThreshold,
    ReservedNamespace,
    SegmentTiming,
    WordTiming,
    UniqueIds,
}

impl RuleKind {
    /// Every rule, in the order the engine runs them
    pub const ALL: [RuleKind; 10] = [
        RuleKind::SegmentOrder,
        RuleKind::WordText,
        RuleKind::ZeroDuration,
        RuleKind::References,
        RuleKind::LanguageCodes,
        RuleKind::ConfidenceThreshold,
        RuleKind::ReservedNamespace,
        RuleKind::SegmentTiming,
        RuleKind::WordTiming,
        RuleKind::UniqueIds,
    ];

    /// Name used in configuration files and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::SegmentOrder => "segment_order",
            RuleKind::WordText => "word_text",
            RuleKind::ZeroDuration => "zero_duration",
            RuleKind::References => "references",
            RuleKind::LanguageCodes => "language_codes",
            RuleKind::ConfidenceThreshold => "confidence_threshold",
            RuleKind::ReservedNamespace => "reserved_namespace",
            RuleKind::SegmentTiming => "segment_timing",
            RuleKind::WordTiming => "word_timing",
            RuleKind::UniqueIds => "unique_ids",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RuleKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        RuleKind::ALL
            .iter()
            .find(|rule| rule.as_str() == s.trim())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown semantic rule: {}", s))
    }
}

/// Which phase produced an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "rule")]
pub enum IssueSource {
    /// Shape, type, range, enumeration or presence check
    Structural,
    /// Cross-field rule
    Semantic(RuleKind),
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Field path relative to the `stj` root object (empty for the root)
    pub path: String,
    /// Human-readable explanation
    pub message: String,
    /// Severity of the finding
    pub severity: Severity,
    /// Phase (and rule) that produced the finding
    pub source: IssueSource,
}

impl Issue {
    /// Create a structural error
    pub fn structural(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
            source: IssueSource::Structural,
        }
    }

    /// Create a semantic error raised by `rule`
    pub fn semantic(rule: RuleKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
            source: IssueSource::Semantic(rule),
        }
    }

    /// Downgrade to a warning
    pub fn as_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    /// Set an explicit severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Semantic rule that produced this issue, if any
    pub fn rule(&self) -> Option<RuleKind> {
        match self.source {
            IssueSource::Semantic(rule) => Some(rule),
            IssueSource::Structural => None,
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "root" } else { self.path.as_str() };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Build the path of a named member under `parent`
pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Build the path of an array item under `parent`
pub fn item_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

/// Render a timestamp the way messages cite it (`1.0`, `4.5`)
pub fn format_time(seconds: f64) -> String {
    format!("{:?}", seconds)
}
