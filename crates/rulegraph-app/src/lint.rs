//! The `lint` use case: validate a rule graph without evaluating it.

use rulegraph_domain::error::GraphError;
use rulegraph_domain::graph::sort_rules;
use rulegraph_types::RuleDefinition;

/// Output from the lint use case.
#[derive(Clone, Debug)]
pub enum LintOutcome {
    /// The graph is well formed; carries rule codes in evaluation order.
    Valid { order: Vec<String> },
    /// The graph cannot be evaluated.
    Invalid { error: GraphError },
}

/// Check codes and dependency edges: duplicates, unknown references, cycles.
pub fn run_lint(rules: &[RuleDefinition]) -> LintOutcome {
    match sort_rules(rules) {
        Ok(ordered) => LintOutcome::Valid {
            order: ordered.into_iter().map(|rule| rule.code).collect(),
        },
        Err(error) => LintOutcome::Invalid { error },
    }
}

/// Format the evaluation order for terminal display.
pub fn format_order(order: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} rules, evaluation order:\n", order.len()));
    for (index, code) in order.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", index + 1, code));
    }
    out
}
