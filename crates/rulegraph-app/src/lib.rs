//! Use case orchestration for rulegraph.
//!
//! This crate provides the application layer: use cases that coordinate document parsing, the
//! domain evaluator, and rendering. It is intentionally thin and delegates heavy lifting to
//! `rulegraph-domain`.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod evaluate;
mod explain;
mod hash;
mod lint;
mod render;
mod report;

pub use evaluate::{
    parse_rules_json, run_evaluate, verdict_exit_code, EvaluateInput, EvaluateOutput,
};
pub use explain::{format_not_found, format_rule, run_explain, ExplainOutput};
pub use hash::{run_hash, HashOutput};
pub use lint::{format_order, run_lint, LintOutcome};
pub use render::render_markdown;
pub use report::{parse_report_json, runtime_error_report, serialize_report};
