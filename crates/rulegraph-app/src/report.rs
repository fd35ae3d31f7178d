//! Report document helpers: serialization, parsing, and the runtime-error receipt.

use anyhow::Context;
use rulegraph_types::{
    EvaluationData, EvaluationFinding, EvaluationReport, Severity, ToolMeta, CODE_RUNTIME_ERROR,
    SCHEMA_EVALUATION_V1, TOOL_NAME,
};
use time::OffsetDateTime;

pub fn serialize_report(report: &EvaluationReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<EvaluationReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    if schema == SCHEMA_EVALUATION_V1 {
        return serde_json::from_value(value).context("parse evaluation report");
    }

    // Forward compat: accept anything that still deserializes as the v1 envelope.
    match serde_json::from_value::<EvaluationReport>(value) {
        Ok(report) => Ok(report),
        Err(_) => anyhow::bail!("unknown report schema: {schema}"),
    }
}

/// Receipt written when the tool itself fails: a fail verdict carrying a single
/// synthetic finding with the error text.
pub fn runtime_error_report(message: &str) -> EvaluationReport {
    let now = OffsetDateTime::now_utc();
    EvaluationReport {
        schema: SCHEMA_EVALUATION_V1.to_string(),
        tool: ToolMeta {
            name: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Severity::Fail,
        findings: vec![EvaluationFinding {
            code: CODE_RUNTIME_ERROR.to_string(),
            severity: Severity::Fail,
            message: message.to_string(),
            explain: "Fix the tool error and re-run rulegraph.".to_string(),
            rule_version_id: "-".to_string(),
            title: "Runtime error".to_string(),
            citations: Vec::new(),
            actions: None,
        }],
        data: EvaluationData {
            rules_evaluated: 0,
            rules_triggered: 1,
            as_of: String::new(),
            shadow: false,
            include_pass_findings: false,
            inputs_snapshot_hash: String::new(),
            inputs_canonical: serde_json::Value::Null,
            actions: Vec::new(),
            latency_ms: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_the_envelope() {
        let report = runtime_error_report("rules file not found");
        let bytes = serialize_report(&report).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let back = parse_report_json(&text).unwrap();

        assert_eq!(back.schema, SCHEMA_EVALUATION_V1);
        assert_eq!(back.verdict, Severity::Fail);
        assert_eq!(back.findings.len(), 1);
        assert_eq!(back.findings[0].code, CODE_RUNTIME_ERROR);
        assert_eq!(back.findings[0].message, "rules file not found");
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let err = parse_report_json(r#"{"schema": "other.report.v9"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema: other.report.v9"));
    }

    #[test]
    fn runtime_error_report_shape() {
        let report = runtime_error_report("boom");
        assert_eq!(report.verdict, Severity::Fail);
        assert_eq!(report.data.rules_evaluated, 0);
        assert_eq!(report.data.rules_triggered, 1);
        assert_eq!(report.findings[0].title, "Runtime error");
        assert_eq!(report.findings[0].rule_version_id, "-");
    }
}
