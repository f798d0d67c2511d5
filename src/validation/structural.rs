/*!
 * Structural validation of STJ documents.
 *
 * Checks presence, JSON types, numeric ranges, enumerations, patterns
 * (semver, RFC 3339, URIs) and unknown properties. Every entity is described
 * by a static `ObjectPolicy` table, so supporting a new field means adding a
 * `FieldRule` row rather than touching the traversal code.
 *
 * This phase never looks across entities; cross-references, ordering and
 * derived consistency are the semantic rules' job.
 */

use anyhow::Result;
use log::debug;
use semver::{Version, VersionReq};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::app_config::{
    default_supported_versions, default_version_requirement, UnknownProperties, ValidationConfig,
};
use crate::document::model::{json_type_name, stj_root, STJ_ROOT_KEY};
use crate::errors::MalformedInputError;

use super::issue::{child_path, item_path, Issue, Severity};

/// What a field must look like
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Any string
    String,
    /// String with at least one non-whitespace character
    NonEmptyString,
    /// Any number
    Number,
    /// Non-negative number of seconds
    Timestamp,
    /// Number in `[0.0, 1.0]`
    Confidence,
    Boolean,
    /// String from a closed set
    Enum(&'static [&'static str]),
    /// Array of strings
    StringList,
    /// Nested object checked against its own policy
    Object(&'static ObjectPolicy),
    /// Array of objects checked against `item`
    ObjectList {
        item: &'static ObjectPolicy,
        non_empty: bool,
    },
    /// Namespaced extension mapping
    Extensions,
    /// Semantic version accepted by the configured requirement
    Version,
    /// RFC 3339 date-time string
    DateTime,
    /// Absolute URI
    Uri,
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::String
            | FieldKind::NonEmptyString
            | FieldKind::Enum(_)
            | FieldKind::Version
            | FieldKind::DateTime
            | FieldKind::Uri => "a string",
            FieldKind::Number | FieldKind::Timestamp | FieldKind::Confidence => "a number",
            FieldKind::Boolean => "a boolean",
            FieldKind::StringList => "an array of strings",
            FieldKind::ObjectList { .. } => "an array of objects",
            FieldKind::Object(_) | FieldKind::Extensions => "an object",
        }
    }
}

/// Declarative rule for one member of an object
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

/// How members not listed in a policy are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownPolicy {
    /// Always an error (top level of the document)
    Reject,
    /// Severity taken from `ValidationConfig::unknown_properties`
    Configured,
    /// Free-form entity, anything goes
    Allow,
}

/// Checks that need more than one member of the same object
type ObjectCheck = fn(&Map<String, Value>, &str, &mut Vec<Issue>);

/// Policy table for one entity
#[derive(Debug)]
pub struct ObjectPolicy {
    pub name: &'static str,
    pub fields: &'static [FieldRule],
    pub unknown: UnknownPolicy,
    pub extra: Option<ObjectCheck>,
}

impl ObjectPolicy {
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub static FREEFORM: ObjectPolicy = ObjectPolicy {
    name: "free-form block",
    fields: &[],
    unknown: UnknownPolicy::Allow,
    extra: None,
};

pub static WORD: ObjectPolicy = ObjectPolicy {
    name: "word",
    fields: &[
        FieldRule::required("start", FieldKind::Timestamp),
        FieldRule::required("end", FieldKind::Timestamp),
        FieldRule::required("text", FieldKind::NonEmptyString),
        FieldRule::optional("confidence", FieldKind::Confidence),
        FieldRule::optional("is_zero_duration", FieldKind::Boolean),
        FieldRule::optional("extensions", FieldKind::Extensions),
    ],
    unknown: UnknownPolicy::Configured,
    extra: None,
};

pub static SEGMENT: ObjectPolicy = ObjectPolicy {
    name: "segment",
    fields: &[
        FieldRule::optional("start", FieldKind::Timestamp),
        FieldRule::optional("end", FieldKind::Timestamp),
        FieldRule::required("text", FieldKind::String),
        FieldRule::optional("speaker_id", FieldKind::NonEmptyString),
        FieldRule::optional("style_id", FieldKind::NonEmptyString),
        FieldRule::optional("language", FieldKind::NonEmptyString),
        FieldRule::optional("confidence", FieldKind::Confidence),
        FieldRule::optional("word_timing_mode", FieldKind::Enum(&["complete", "partial"])),
        FieldRule::optional("words", FieldKind::ObjectList { item: &WORD, non_empty: false }),
        FieldRule::optional("is_zero_duration", FieldKind::Boolean),
        FieldRule::optional("extensions", FieldKind::Extensions),
    ],
    unknown: UnknownPolicy::Configured,
    extra: Some(check_segment_text),
};

pub static SPEAKER: ObjectPolicy = ObjectPolicy {
    name: "speaker",
    fields: &[
        FieldRule::required("id", FieldKind::NonEmptyString),
        FieldRule::optional("name", FieldKind::String),
        FieldRule::optional("extensions", FieldKind::Extensions),
    ],
    unknown: UnknownPolicy::Allow,
    extra: None,
};

pub static STYLE: ObjectPolicy = ObjectPolicy {
    name: "style",
    fields: &[
        FieldRule::required("id", FieldKind::NonEmptyString),
        FieldRule::optional("text", FieldKind::Object(&FREEFORM)),
        FieldRule::optional("display", FieldKind::Object(&FREEFORM)),
        FieldRule::optional("extensions", FieldKind::Extensions),
    ],
    unknown: UnknownPolicy::Allow,
    extra: None,
};

pub static TRANSCRIPT: ObjectPolicy = ObjectPolicy {
    name: "transcript",
    fields: &[
        FieldRule::optional("speakers", FieldKind::ObjectList { item: &SPEAKER, non_empty: false }),
        FieldRule::optional("styles", FieldKind::ObjectList { item: &STYLE, non_empty: false }),
        FieldRule::required("segments", FieldKind::ObjectList { item: &SEGMENT, non_empty: true }),
    ],
    unknown: UnknownPolicy::Configured,
    extra: None,
};

pub static TRANSCRIBER: ObjectPolicy = ObjectPolicy {
    name: "transcriber",
    fields: &[
        FieldRule::required("name", FieldKind::NonEmptyString),
        FieldRule::required("version", FieldKind::NonEmptyString),
    ],
    unknown: UnknownPolicy::Configured,
    extra: None,
};

pub static SOURCE: ObjectPolicy = ObjectPolicy {
    name: "source",
    fields: &[
        FieldRule::optional("uri", FieldKind::Uri),
        FieldRule::optional("duration", FieldKind::Timestamp),
        FieldRule::optional("languages", FieldKind::StringList),
        FieldRule::optional("extensions", FieldKind::Extensions),
    ],
    unknown: UnknownPolicy::Configured,
    extra: None,
};

pub static METADATA: ObjectPolicy = ObjectPolicy {
    name: "metadata",
    fields: &[
        FieldRule::optional("transcriber", FieldKind::Object(&TRANSCRIBER)),
        FieldRule::optional("created_at", FieldKind::DateTime),
        FieldRule::optional("source", FieldKind::Object(&SOURCE)),
        FieldRule::optional("languages", FieldKind::StringList),
        FieldRule::optional("confidence_threshold", FieldKind::Confidence),
        FieldRule::optional("extensions", FieldKind::Extensions),
    ],
    unknown: UnknownPolicy::Configured,
    extra: Some(check_duplicate_languages),
};

pub static STJ_ROOT: ObjectPolicy = ObjectPolicy {
    name: "stj",
    fields: &[
        FieldRule::required("version", FieldKind::Version),
        FieldRule::optional("metadata", FieldKind::Object(&METADATA)),
        FieldRule::required("transcript", FieldKind::Object(&TRANSCRIPT)),
    ],
    unknown: UnknownPolicy::Reject,
    extra: None,
};

/// Empty segment text is only allowed on zero-duration segments
fn check_segment_text(segment: &Map<String, Value>, path: &str, issues: &mut Vec<Issue>) {
    let zero_duration = segment
        .get("is_zero_duration")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if let Some(text) = segment.get("text").and_then(Value::as_str) {
        if text.trim().is_empty() && !zero_duration {
            issues.push(Issue::structural(
                child_path(path, "text"),
                "Segment text must not be empty unless the segment is zero-duration",
            ));
        }
    }
}

fn check_duplicate_languages(metadata: &Map<String, Value>, path: &str, issues: &mut Vec<Issue>) {
    let Some(languages) = metadata.get("languages").and_then(Value::as_array) else {
        return;
    };

    let languages_path = child_path(path, "languages");
    let mut seen = HashSet::new();
    for (index, code) in languages.iter().enumerate() {
        if let Some(code) = code.as_str() {
            if !seen.insert(code) {
                issues.push(
                    Issue::structural(
                        item_path(&languages_path, index),
                        format!("Duplicate language '{}' in metadata.languages", code),
                    )
                    .as_warning(),
                );
            }
        }
    }
}

/// Policy-table driven structural validator
#[derive(Debug, Clone)]
pub struct StructuralValidator {
    version_requirement: VersionReq,
    supported_versions: String,
    unknown_severity: Option<Severity>,
}

impl StructuralValidator {
    /// Create a validator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator from configuration
    pub fn with_config(config: &ValidationConfig) -> Result<Self> {
        Ok(Self {
            version_requirement: config.version_requirement()?,
            supported_versions: config.supported_versions.clone(),
            unknown_severity: config.unknown_properties.severity(),
        })
    }

    /// Validate a whole input tree, including the `{"stj": ...}` wrapper
    pub fn validate(&self, value: &Value) -> Result<Vec<Issue>, MalformedInputError> {
        let root = stj_root(value)?;
        let mut issues = Vec::new();

        if let Some(wrapper) = value.as_object() {
            for key in wrapper.keys().filter(|k| k.as_str() != STJ_ROOT_KEY) {
                issues.push(Issue::structural(
                    key.clone(),
                    format!("Unknown top-level property '{}' outside the 'stj' root object", key),
                ));
            }
        }

        issues.extend(self.validate_root(root));
        Ok(issues)
    }

    /// Validate the contents of the `stj` root object
    pub fn validate_root(&self, root: &Map<String, Value>) -> Vec<Issue> {
        let mut issues = Vec::new();
        self.check_object(&STJ_ROOT, root, "", &mut issues);

        debug!("Structural validation: {} issues", issues.len());
        issues
    }

    fn check_object(
        &self,
        policy: &ObjectPolicy,
        object: &Map<String, Value>,
        path: &str,
        issues: &mut Vec<Issue>,
    ) {
        for rule in policy.fields {
            let field_path = child_path(path, rule.name);
            match object.get(rule.name) {
                Some(value) => self.check_field(rule, value, &field_path, issues),
                None if rule.required => issues.push(Issue::structural(
                    field_path,
                    format!("Missing required field '{}' in {}", rule.name, policy.name),
                )),
                None => {}
            }
        }

        let unknown_severity = match policy.unknown {
            UnknownPolicy::Allow => None,
            UnknownPolicy::Reject => Some(Severity::Error),
            UnknownPolicy::Configured => self.unknown_severity,
        };
        if let Some(severity) = unknown_severity {
            for key in object.keys().filter(|k| policy.field(k).is_none()) {
                issues.push(
                    Issue::structural(
                        child_path(path, key),
                        format!(
                            "Unknown property '{}' in {}; custom data belongs in an extensions namespace",
                            key, policy.name
                        ),
                    )
                    .with_severity(severity),
                );
            }
        }

        if let Some(extra) = policy.extra {
            extra(object, path, issues);
        }
    }

    fn check_field(&self, rule: &FieldRule, value: &Value, path: &str, issues: &mut Vec<Issue>) {
        let type_error = |issues: &mut Vec<Issue>| {
            issues.push(Issue::structural(
                path,
                format!(
                    "Field '{}' must be {}, found {}",
                    rule.name,
                    rule.kind.expected(),
                    json_type_name(value)
                ),
            ));
        };

        match rule.kind {
            FieldKind::String => {
                if !value.is_string() {
                    type_error(issues);
                }
            }
            FieldKind::NonEmptyString => match value.as_str() {
                Some(s) if s.trim().is_empty() => issues.push(Issue::structural(
                    path,
                    format!("Field '{}' must not be empty", rule.name),
                )),
                Some(_) => {}
                None => type_error(issues),
            },
            FieldKind::Number => {
                if !value.is_number() {
                    type_error(issues);
                }
            }
            FieldKind::Timestamp => match value.as_f64() {
                Some(t) if t < 0.0 => issues.push(Issue::structural(
                    path,
                    format!("Field '{}' must be non-negative, found {}", rule.name, t),
                )),
                Some(_) => {}
                None => type_error(issues),
            },
            FieldKind::Confidence => match value.as_f64() {
                Some(c) if !(0.0..=1.0).contains(&c) => issues.push(Issue::structural(
                    path,
                    format!("Field '{}' must be between 0.0 and 1.0, found {}", rule.name, c),
                )),
                Some(_) => {}
                None => type_error(issues),
            },
            FieldKind::Boolean => {
                if !value.is_boolean() {
                    type_error(issues);
                }
            }
            FieldKind::Enum(allowed) => match value.as_str() {
                Some(s) if !allowed.contains(&s) => issues.push(Issue::structural(
                    path,
                    format!(
                        "Field '{}' must be one of: {} (found '{}')",
                        rule.name,
                        allowed.join(", "),
                        s
                    ),
                )),
                Some(_) => {}
                None => type_error(issues),
            },
            FieldKind::StringList => match value.as_array() {
                Some(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if !item.is_string() {
                            issues.push(Issue::structural(
                                item_path(path, index),
                                format!(
                                    "Items of '{}' must be strings, found {}",
                                    rule.name,
                                    json_type_name(item)
                                ),
                            ));
                        }
                    }
                }
                None => type_error(issues),
            },
            FieldKind::Object(policy) => match value.as_object() {
                Some(object) => self.check_object(policy, object, path, issues),
                None => type_error(issues),
            },
            FieldKind::ObjectList { item, non_empty } => match value.as_array() {
                Some(items) => {
                    if non_empty && items.is_empty() {
                        issues.push(Issue::structural(
                            path,
                            format!("Field '{}' must contain at least one {}", rule.name, item.name),
                        ));
                    }
                    for (index, entry) in items.iter().enumerate() {
                        let entry_path = item_path(path, index);
                        match entry.as_object() {
                            Some(object) => self.check_object(item, object, &entry_path, issues),
                            None => issues.push(Issue::structural(
                                entry_path,
                                format!(
                                    "Each {} must be an object, found {}",
                                    item.name,
                                    json_type_name(entry)
                                ),
                            )),
                        }
                    }
                }
                None => type_error(issues),
            },
            FieldKind::Extensions => match value.as_object() {
                Some(namespaces) => {
                    for (namespace, data) in namespaces {
                        let namespace_path = child_path(path, namespace);
                        if namespace.trim().is_empty() {
                            issues.push(Issue::structural(
                                namespace_path.clone(),
                                "Extension namespace must not be empty",
                            ));
                        }
                        if !data.is_object() {
                            issues.push(Issue::structural(
                                namespace_path,
                                format!(
                                    "Extension namespace '{}' must be an object, found {}",
                                    namespace,
                                    json_type_name(data)
                                ),
                            ));
                        }
                    }
                }
                None => type_error(issues),
            },
            FieldKind::Version => match value.as_str() {
                Some(version) => match Version::parse(version.trim()) {
                    Ok(parsed) if !self.version_requirement.matches(&parsed) => {
                        issues.push(Issue::structural(
                            path,
                            format!(
                                "Unsupported STJ version '{}' (supported: {})",
                                version, self.supported_versions
                            ),
                        ))
                    }
                    Ok(_) => {}
                    Err(e) => issues.push(Issue::structural(
                        path,
                        format!("Version '{}' is not a valid semantic version: {}", version, e),
                    )),
                },
                None => type_error(issues),
            },
            FieldKind::DateTime => match value.as_str() {
                Some(s) => {
                    if let Err(e) = chrono::DateTime::parse_from_rfc3339(s) {
                        issues.push(Issue::structural(
                            path,
                            format!("'{}' is not a valid RFC 3339 timestamp: {}", s, e),
                        ));
                    }
                }
                None => type_error(issues),
            },
            FieldKind::Uri => match value.as_str() {
                Some(s) => {
                    if let Err(e) = url::Url::parse(s) {
                        issues.push(Issue::structural(
                            path,
                            format!("'{}' is not a valid absolute URI: {}", s, e),
                        ));
                    }
                }
                None => type_error(issues),
            },
        }
    }
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self {
            version_requirement: default_version_requirement(),
            supported_versions: default_supported_versions(),
            unknown_severity: UnknownProperties::default().severity(),
        }
    }
}
