/*!
 * Error types for the stj-validator crate.
 *
 * Two failure classes exist: a document that is not a well-formed data tree
 * (`MalformedInputError`, always fatal) and a rule violation that was raised
 * instead of collected (`ValidationError::Failed`, fail-fast mode only).
 */

use thiserror::Error;

use crate::validation::issue::Issue;

/// The input is not a well-formed STJ data tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedInputError {
    /// Raw input could not be decoded as JSON
    #[error("Input is not valid JSON: {0}")]
    Decode(String),

    /// The root of the data tree is not an object
    #[error("Root must be a JSON object, found {found}")]
    RootNotObject {
        /// JSON type found at the root
        found: &'static str,
    },

    /// The root object has no `stj` member
    #[error("Missing 'stj' root object")]
    MissingStjRoot,

    /// The `stj` member exists but is not an object
    #[error("'stj' root must be an object, found {found}")]
    StjRootNotObject {
        /// JSON type found under `stj`
        found: &'static str,
    },
}

/// Errors returned by the validation entry points
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The document could not be built at all
    #[error("Malformed input: {0}")]
    Malformed(#[from] MalformedInputError),

    /// Fail-fast mode hit its first error-severity issue
    #[error("Validation failed at {}", .0)]
    Failed(Issue),
}

impl ValidationError {
    /// The issue that stopped a fail-fast run, if any
    pub fn issue(&self) -> Option<&Issue> {
        match self {
            Self::Failed(issue) => Some(issue),
            Self::Malformed(_) => None,
        }
    }
}

/// Main application error type used by the CLI and file utilities
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the validator
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Input could not be turned into a document
    #[error("Malformed input: {0}")]
    Malformed(#[from] MalformedInputError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
