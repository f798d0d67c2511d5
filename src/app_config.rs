use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use semver::{Comparator, Op, Prerelease, VersionReq};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::validation::issue::{RuleKind, Severity};
use crate::validation::report::ValidationMode;

/// Application configuration module
/// This module handles the validator configuration: loading it from a JSON
/// file, filling defaults and checking the values make sense.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Validation behaviour
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for the validation service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    /// Collect every issue, or stop at the first error
    #[serde(default)]
    pub mode: ValidationMode,

    /// Run semantic rules even when the structural phase found errors
    #[serde(default = "default_true")]
    pub permissive: bool,

    /// Semver requirement the document `version` must satisfy
    #[serde(default = "default_supported_versions")]
    pub supported_versions: String,

    /// Treatment of unknown properties below the top level
    #[serde(default)]
    pub unknown_properties: UnknownProperties,

    /// Emit warnings for confidences below `metadata.confidence_threshold`
    #[serde(default)]
    pub confidence_advisories: bool,

    /// Semantic rules to skip, by name (e.g. `"language_codes"`)
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

fn default_true() -> bool {
    true
}

pub(crate) fn default_supported_versions() -> String {
    "^0.6".to_string()
}

/// `^0.6` as a value, matching `default_supported_versions`
pub(crate) fn default_version_requirement() -> VersionReq {
    VersionReq {
        comparators: vec![Comparator {
            op: Op::Caret,
            major: 0,
            minor: Some(6),
            patch: None,
            pre: Prerelease::EMPTY,
        }],
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::default(),
            permissive: default_true(),
            supported_versions: default_supported_versions(),
            unknown_properties: UnknownProperties::default(),
            confidence_advisories: false,
            disabled_rules: Vec::new(),
        }
    }
}

impl ValidationConfig {
    /// Parsed form of `supported_versions`
    pub fn version_requirement(&self) -> Result<VersionReq> {
        VersionReq::parse(&self.supported_versions).with_context(|| {
            format!("Invalid supported_versions requirement: {}", self.supported_versions)
        })
    }

    /// Parsed form of `disabled_rules`
    pub fn disabled_rule_kinds(&self) -> Result<Vec<RuleKind>> {
        self.disabled_rules
            .iter()
            .map(|name| name.parse::<RuleKind>())
            .collect()
    }

    pub fn is_rule_enabled(&self, rule: RuleKind) -> bool {
        !self.disabled_rules.iter().any(|name| name.trim() == rule.as_str())
    }
}

/// How unknown keys in nested objects are reported
///
/// Unknown keys directly under the `stj` root or beside it are always errors.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownProperties {
    #[default]
    Allow,
    Warning,
    Error,
}

impl UnknownProperties {
    /// Severity to report with, `None` when unknown keys are accepted
    pub fn severity(self) -> Option<Severity> {
        match self {
            UnknownProperties::Allow => None,
            UnknownProperties::Warning => Some(Severity::Warning),
            UnknownProperties::Error => Some(Severity::Error),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.validation.version_requirement()?;

        let unknown: Vec<&String> = self
            .validation
            .disabled_rules
            .iter()
            .filter(|name| name.parse::<RuleKind>().is_err())
            .collect();
        if !unknown.is_empty() {
            return Err(anyhow!(
                "Unknown rule(s) in disabled_rules: {}",
                unknown.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            validation: ValidationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
