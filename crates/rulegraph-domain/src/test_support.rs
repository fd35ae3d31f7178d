//! Test-only builders for rule definitions.

use rulegraph_types::{FailSeverity, RuleDefinition};
use serde_json::Value as JsonValue;

/// A fail-severity rule with no dependencies and plain fallback messages.
pub fn rule(code: &str, expression: &str) -> RuleDefinition {
    RuleDefinition {
        id: format!("rule-{}", code.to_lowercase()),
        code: code.to_string(),
        title: format!("{code} title"),
        version_id: "v1".to_string(),
        expression: expression.to_string(),
        severity_on_fail: FailSeverity::Fail,
        citations: Vec::new(),
        fail_message: format!("{code} failed."),
        fail_explain: format!("{code} explain."),
        pass_message: None,
        pass_explain: None,
        actions_on_fail: None,
        dependencies: Vec::new(),
    }
}

pub fn warn_rule(code: &str, expression: &str) -> RuleDefinition {
    RuleDefinition {
        severity_on_fail: FailSeverity::Warn,
        ..rule(code, expression)
    }
}

pub fn with_dependencies(mut def: RuleDefinition, deps: &[&str]) -> RuleDefinition {
    def.dependencies = deps.iter().map(|d| d.to_string()).collect();
    def
}

pub fn with_actions(mut def: RuleDefinition, actions: JsonValue) -> RuleDefinition {
    def.actions_on_fail = Some(actions);
    def
}
