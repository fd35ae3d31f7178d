//! Error taxonomy for rule-graph evaluation.
//!
//! Every variant is fatal to the run that raised it: the engine returns a
//! complete summary or one of these, never a partial summary.

use rulegraph_expr::ExprError;
use thiserror::Error;

/// Structural problems in a rule set's dependency graph. Surfaced to rule
/// authors; not retryable without fixing the rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// `path` lists the codes along the cycle, ending where it began.
    #[error("cycle detected in rule dependencies: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("missing rule definition for dependency: {code}")]
    MissingDependency { code: String },

    #[error("duplicate rule code: {code}")]
    DuplicateCode { code: String },
}

/// Option validation failures, rejected before any rule is evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid as_of timestamp: {value} (expected RFC 3339)")]
    InvalidAsOf { value: String },
}

/// Umbrella error returned by `evaluate_rule_graph`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvaluateError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Expression failures always name the rule that raised them.
    #[error("rule {code} failed to evaluate: {source}")]
    Expression {
        code: String,
        #[source]
        source: ExprError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
