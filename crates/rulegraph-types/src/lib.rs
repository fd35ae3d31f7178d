//! Stable DTOs and IDs used across the rulegraph workspace.
//!
//! This crate is intentionally boring:
//! - the rule definition and rules-file document
//! - data types for the emitted evaluation receipt/report
//! - stable schema IDs and finding codes

#![forbid(unsafe_code)]

pub mod ids;
pub mod receipt;
pub mod rules;
pub mod severity;

pub use ids::{CODE_RUNTIME_ERROR, SCHEMA_EVALUATION_V1, SCHEMA_RULES_V1, TOOL_NAME};
pub use receipt::{EvaluationData, EvaluationFinding, EvaluationReport, ReportEnvelope, ToolMeta};
pub use rules::{RuleDefinition, RuleDependencyOutcome, RuleSetFile};
pub use severity::{FailSeverity, Severity};
