//! The `evaluate` use case: run a rule graph over an input snapshot and produce a report.

use anyhow::Context;
use rulegraph_domain::{evaluate_rule_graph, EvaluateOptions};
use rulegraph_types::{
    EvaluationData, EvaluationReport, RuleSetFile, Severity, ToolMeta, SCHEMA_EVALUATION_V1,
    SCHEMA_RULES_V1, TOOL_NAME,
};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Input for the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateInput<'a> {
    /// Rules document contents (JSON).
    pub rules_text: &'a str,
    /// Input snapshot contents (JSON).
    pub inputs_text: &'a str,
    /// Decision timestamp, RFC 3339.
    pub as_of: &'a str,
    /// Record the run as a shadow evaluation.
    pub shadow: bool,
    /// Report pass findings alongside warn and fail findings.
    pub include_pass_findings: bool,
}

/// Output from the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluateOutput {
    /// The generated report.
    pub report: EvaluationReport,
}

/// Parse a rules document and check its schema identifier.
pub fn parse_rules_json(text: &str) -> anyhow::Result<RuleSetFile> {
    let file: RuleSetFile = serde_json::from_str(text).context("parse rules json")?;
    if let Some(schema) = &file.schema {
        if schema != SCHEMA_RULES_V1 {
            anyhow::bail!("unknown rules schema: {schema} (expected {SCHEMA_RULES_V1})");
        }
    }
    Ok(file)
}

/// Run the evaluate use case: parse both documents, evaluate the graph, build the report.
pub fn run_evaluate(input: EvaluateInput<'_>) -> anyhow::Result<EvaluateOutput> {
    let started_at = OffsetDateTime::now_utc();

    let rules_file = parse_rules_json(input.rules_text)?;
    let inputs: JsonValue = serde_json::from_str(input.inputs_text).context("parse inputs json")?;

    let options = EvaluateOptions {
        as_of: input.as_of.to_string(),
        shadow: input.shadow,
        include_pass_findings: input.include_pass_findings,
    };
    let summary = evaluate_rule_graph(&rules_file.rules, &inputs, &options)?;

    let finished_at = OffsetDateTime::now_utc();
    let rules_triggered = summary
        .findings
        .iter()
        .filter(|finding| finding.severity != Severity::Pass)
        .count() as u32;

    let report = EvaluationReport {
        schema: SCHEMA_EVALUATION_V1.to_string(),
        tool: ToolMeta {
            name: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict: summary.result,
        findings: summary.findings,
        data: EvaluationData {
            rules_evaluated: rules_file.rules.len() as u32,
            rules_triggered,
            as_of: input.as_of.to_string(),
            shadow: input.shadow,
            include_pass_findings: input.include_pass_findings,
            inputs_snapshot_hash: summary.inputs_snapshot_hash,
            inputs_canonical: summary.inputs_canonical,
            actions: summary.actions,
            latency_ms: summary.latency_ms,
        },
    };

    Ok(EvaluateOutput { report })
}

/// Map a verdict to an exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Severity) -> i32 {
    match verdict {
        Severity::Pass => 0,
        Severity::Warn => 0,
        Severity::Fail => 2,
    }
}
