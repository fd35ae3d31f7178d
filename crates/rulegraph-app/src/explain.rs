//! The `explain` use case: look up a rule definition for terminal display.

use rulegraph_types::{FailSeverity, RuleDefinition};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found the rule with the requested code.
    Found(RuleDefinition),
    /// Unknown code; includes the codes that are available.
    NotFound {
        code: String,
        available_codes: Vec<String>,
    },
}

/// Look up a rule by code.
pub fn run_explain(rules: &[RuleDefinition], code: &str) -> ExplainOutput {
    match rules.iter().find(|rule| rule.code == code) {
        Some(rule) => ExplainOutput::Found(rule.clone()),
        None => ExplainOutput::NotFound {
            code: code.to_string(),
            available_codes: rules.iter().map(|rule| rule.code.clone()).collect(),
        },
    }
}

/// Format a rule definition for terminal display.
pub fn format_rule(rule: &RuleDefinition) -> String {
    let mut out = String::new();

    out.push_str(&rule.title);
    out.push('\n');
    out.push_str(&"=".repeat(rule.title.len()));
    out.push_str("\n\n");
    out.push_str(&format!("Code:             {}\n", rule.code));
    out.push_str(&format!("Version:          {}\n", rule.version_id));
    out.push_str(&format!("Severity on fail: {}\n", severity_label(rule)));
    out.push_str(&format!("Expression:       {}\n", rule.expression));
    if !rule.dependencies.is_empty() {
        out.push_str(&format!(
            "Depends on:       {}\n",
            rule.dependencies.join(", ")
        ));
    }

    if !rule.citations.is_empty() {
        out.push_str("\nCitations\n");
        out.push_str("---------\n");
        for citation in &rule.citations {
            out.push_str(&format!("  - {}\n", citation));
        }
    }

    out.push_str("\nMessages\n");
    out.push_str("--------\n");
    out.push_str(&format!("  fail: {}\n", rule.fail_message));
    if let Some(pass) = &rule.pass_message {
        out.push_str(&format!("  pass: {}\n", pass));
    }

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(code: &str, available_codes: &[String]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown rule code: {}\n\n", code));
    out.push_str("Available codes:\n");
    for code in available_codes {
        out.push_str(&format!("  - {}\n", code));
    }

    out
}

fn severity_label(rule: &RuleDefinition) -> &'static str {
    match rule.severity_on_fail {
        FailSeverity::Warn => "warn",
        FailSeverity::Fail => "fail",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rules() -> Vec<RuleDefinition> {
        vec![RuleDefinition {
            id: "rule-fico".to_string(),
            code: "FICO_MIN".to_string(),
            title: "Minimum FICO".to_string(),
            version_id: "v3".to_string(),
            expression: "inputs.borrower.fico < 620".to_string(),
            severity_on_fail: FailSeverity::Fail,
            citations: vec!["12 CFR 1026.43(c)".to_string()],
            fail_message: "FICO below floor.".to_string(),
            fail_explain: "Program floor is 620.".to_string(),
            pass_message: Some("FICO meets the floor.".to_string()),
            pass_explain: None,
            actions_on_fail: None,
            dependencies: vec!["IDENTITY_VERIFIED".to_string()],
        }]
    }

    #[test]
    fn explain_known_code() {
        let output = run_explain(&sample_rules(), "FICO_MIN");
        assert!(matches!(output, ExplainOutput::Found(_)));
    }

    #[test]
    fn explain_unknown_code() {
        let output = run_explain(&sample_rules(), "NOT_A_RULE");
        let (code, available) = unwrap_not_found(output);
        assert_eq!(code, "NOT_A_RULE");
        assert_eq!(available, vec!["FICO_MIN".to_string()]);
    }

    #[test]
    fn format_rule_output() {
        let rule = unwrap_found(run_explain(&sample_rules(), "FICO_MIN"));
        let formatted = format_rule(&rule);
        assert!(formatted.contains("Minimum FICO\n============"));
        assert!(formatted.contains("Severity on fail: fail"));
        assert!(formatted.contains("Depends on:       IDENTITY_VERIFIED"));
        assert!(formatted.contains("Citations"));
        assert!(formatted.contains("  - 12 CFR 1026.43(c)"));
        assert!(formatted.contains("  fail: FICO below floor."));
        assert!(formatted.contains("  pass: FICO meets the floor."));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("MISSING", &["A".to_string(), "B".to_string()]);
        assert!(formatted.contains("Unknown rule code: MISSING"));
        assert!(formatted.contains("Available codes:"));
        assert!(formatted.contains("  - A"));
        assert!(formatted.contains("  - B"));
    }

    fn unwrap_found(output: ExplainOutput) -> RuleDefinition {
        match output {
            ExplainOutput::Found(rule) => rule,
            _ => panic!("expected Found"),
        }
    }

    fn unwrap_not_found(output: ExplainOutput) -> (String, Vec<String>) {
        match output {
            ExplainOutput::NotFound {
                code,
                available_codes,
            } => (code, available_codes),
            _ => panic!("expected NotFound"),
        }
    }

    #[test]
    #[should_panic(expected = "expected Found")]
    fn unwrap_found_panics_for_not_found() {
        let output = run_explain(&sample_rules(), "NOT_A_RULE");
        let _ = unwrap_found(output);
    }

    #[test]
    #[should_panic(expected = "expected NotFound")]
    fn unwrap_not_found_panics_for_found() {
        let output = run_explain(&sample_rules(), "FICO_MIN");
        let _ = unwrap_not_found(output);
    }
}
