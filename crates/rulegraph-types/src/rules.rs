use crate::severity::{FailSeverity, Severity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One immutable policy rule.
///
/// `code` is the human-facing key, unique within a rule set and stable
/// across revisions; `version_id` pins the revision that was evaluated.
/// Message and explain fields are templates rendered against the evaluation
/// context (`{{ inputs.borrower.fico }}` style placeholders).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleDefinition {
    pub id: String,
    pub code: String,
    pub title: String,
    pub version_id: String,

    /// Boolean-producing expression; truthy means the rule triggers.
    pub expression: String,
    pub severity_on_fail: FailSeverity,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,

    pub fail_message: String,
    pub fail_explain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_explain: Option<String>,

    /// Opaque payload forwarded verbatim when the rule triggers. The action
    /// vocabulary belongs to downstream workflow systems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions_on_fail: Option<JsonValue>,

    /// Codes of rules whose outcomes this expression may read via
    /// `dependencies.<code>`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

/// Per-run outcome of one rule, visible to its dependents and discarded
/// after the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleDependencyOutcome {
    pub code: String,
    pub result: Severity,
    pub triggered: bool,
}

/// On-disk rule-set document (`rulegraph.rules.v1`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleSetFile {
    /// Versioned schema identifier; absent is accepted for hand-written files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub rules: Vec<RuleDefinition>,
}
