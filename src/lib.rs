/*!
 * # stj-validator - Standard Transcription JSON validator
 *
 * A Rust library that checks STJ transcription documents for structural and
 * semantic correctness before they are converted or rendered.
 *
 * ## Features
 *
 * - Typed, read-only document model over `{"stj": {...}}` input
 * - Policy-table driven structural validation (types, presence, ranges, enums)
 * - Semantic rules:
 *   - segment ordering and timing
 *   - word/segment text consistency and zero-duration flags
 *   - speaker and style references, unique ids
 *   - ISO 639-1 / ISO 639-3 language code consistency
 *   - reserved extension namespace protection
 * - Collect and fail-fast reporting modes
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: The STJ document model
 * - `validation`: Validation phases and the issue aggregator:
 *   - `validation::structural`: Policy-table structural validator
 *   - `validation::semantic`: Semantic rule engine and rules
 *   - `validation::report`: Issue aggregation
 *   - `validation::service`: Orchestration of both phases
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::{Config, ValidationConfig};
pub use document::{Document, Segment, Speaker, Style, Word, WordTimingMode};
pub use errors::{AppError, MalformedInputError, ValidationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part3};
pub use validation::{
    validate, validate_fail_fast, Issue, RuleKind, Severity, ValidationMode, ValidationReport,
    ValidationService,
};
