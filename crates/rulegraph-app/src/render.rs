//! Markdown rendering for evaluation reports.

use rulegraph_types::{EvaluationReport, Severity};

pub fn render_markdown(report: &EvaluationReport) -> String {
    let mut out = String::new();

    out.push_str("# Rule evaluation report\n\n");
    out.push_str(&format!(
        "- Verdict: **{}**\n- Rules evaluated: {}\n- Rules triggered: {}\n- As of: {}\n- Inputs snapshot: `{}`\n\n",
        severity_label(report.verdict),
        report.data.rules_evaluated,
        report.data.rules_triggered,
        report.data.as_of,
        report.data.inputs_snapshot_hash
    ));

    if report.data.shadow {
        out.push_str("> Note: shadow evaluation; the verdict is advisory and was not enforced.\n\n");
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    for finding in &report.findings {
        out.push_str(&format!(
            "- [{}] `{}`: {}\n",
            severity_label(finding.severity),
            finding.code,
            finding.message
        ));
        if !finding.explain.is_empty() {
            out.push_str(&format!("  - explain: {}\n", finding.explain));
        }
        if !finding.citations.is_empty() {
            out.push_str(&format!("  - citations: {}\n", finding.citations.join(", ")));
        }
        if let Some(actions) = &finding.actions {
            out.push_str(&format!("  - actions: `{}`\n", actions));
        }
    }

    if !report.data.actions.is_empty() {
        out.push_str("\n## Queued actions\n\n");
        for action in &report.data.actions {
            out.push_str(&format!("- `{}`\n", action));
        }
    }

    out
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Pass => "PASS",
        Severity::Warn => "WARN",
        Severity::Fail => "FAIL",
    }
}
