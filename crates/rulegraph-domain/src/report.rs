//! Evaluation output types.

use rulegraph_types::{EvaluationFinding, Severity};
use serde_json::Value as JsonValue;

/// Outcome of one full evaluation run.
///
/// Plain data, no serialization; the app layer wraps it in the report
/// envelope for the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationSummary {
    /// Aggregate verdict: the maximum severity across all rules.
    pub result: Severity,
    /// Reported findings, in rule-evaluation order. Never reordered.
    pub findings: Vec<EvaluationFinding>,
    /// Triggered `actions_on_fail` payloads, in evaluation order.
    pub actions: Vec<JsonValue>,
    /// SHA-256 (lowercase hex) of the canonical serialization of the
    /// original inputs.
    pub inputs_snapshot_hash: String,
    /// The canonicalized inputs the expressions actually evaluated against.
    pub inputs_canonical: JsonValue,
    /// Wall-clock duration in whole milliseconds, from a monotonic clock.
    pub latency_ms: u64,
}
