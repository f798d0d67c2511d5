/*!
 * Validation of STJ documents.
 *
 * Validation runs in two phases whose findings are merged into one report:
 * a policy-table driven structural pass over the raw data tree, then a set
 * of independent semantic rules over the typed document model.
 *
 * # Architecture
 *
 * - `issue`: issue, severity and rule identifiers, field paths
 * - `structural`: shape checks driven by per-entity policy tables
 * - `semantic`: context-dependent rules and the engine that runs them
 * - `report`: the issue aggregator (collect and fail-fast modes)
 * - `service`: orchestrates both phases
 */

pub mod issue;
pub mod report;
pub mod semantic;
pub mod service;
pub mod structural;

// Re-export main types
pub use issue::{Issue, IssueSource, RuleKind, Severity};
pub use report::{ValidationMode, ValidationReport};
pub use semantic::{SemanticEngine, SemanticRule};
pub use service::{validate, validate_fail_fast, ValidationService};
pub use structural::StructuralValidator;
