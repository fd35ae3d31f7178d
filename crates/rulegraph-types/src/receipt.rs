use crate::severity::Severity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// One reported rule outcome.
///
/// Failed and warned rules always produce a finding; passed rules only when
/// the run requested them. Order is evaluation order and is part of the
/// contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationFinding {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    pub explain: String,

    pub rule_version_id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,

    /// Present only when the rule triggered and declared `actions_on_fail`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<JsonValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Rulegraph-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct EvaluationData {
    pub rules_evaluated: u32,
    pub rules_triggered: u32,

    pub as_of: String,
    pub shadow: bool,
    pub include_pass_findings: bool,

    pub inputs_snapshot_hash: String,
    pub inputs_canonical: JsonValue,

    /// Triggered `actions_on_fail` payloads, in evaluation order. Always
    /// serialized so consumers can rely on the key.
    pub actions: Vec<JsonValue>,

    pub latency_ms: u64,
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows rulegraph to embed tool-specific data while
/// still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = EvaluationData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Severity,
    pub findings: Vec<EvaluationFinding>,
    pub data: TData,
}

pub type EvaluationReport = ReportEnvelope<EvaluationData>;

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn envelope_serializes_rfc3339_timestamps() {
        let report = EvaluationReport {
            schema: crate::SCHEMA_EVALUATION_V1.to_string(),
            tool: ToolMeta {
                name: crate::TOOL_NAME.to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: datetime!(2026-01-15 00:00:00 UTC),
            finished_at: datetime!(2026-01-15 00:00:01 UTC),
            verdict: Severity::Pass,
            findings: Vec::new(),
            data: EvaluationData::default(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["schema"], "rulegraph.evaluation.v1");
        assert_eq!(value["started_at"], "2026-01-15T00:00:00Z");
        assert_eq!(value["verdict"], "pass");
        // Canonical inputs default to null but the key stays present.
        assert!(value["data"].get("inputs_canonical").is_some());
    }

    #[test]
    fn finding_omits_absent_actions() {
        let finding = EvaluationFinding {
            code: "FICO_MIN".to_string(),
            severity: Severity::Fail,
            message: "FICO 610 below 620 threshold.".to_string(),
            explain: "Program floor is 620.".to_string(),
            rule_version_id: "v3".to_string(),
            title: "Minimum FICO".to_string(),
            citations: vec!["12 CFR 1026.43(c)".to_string()],
            actions: None,
        };
        let value = serde_json::to_value(&finding).unwrap();
        assert!(value.get("actions").is_none());
        assert_eq!(value["citations"][0], "12 CFR 1026.43(c)");
    }
}
