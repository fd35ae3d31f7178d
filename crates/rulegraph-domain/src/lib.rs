//! Pure rule-graph evaluation (no IO).
//!
//! Input: rule definitions and a JSON input snapshot constructed elsewhere.
//! Output: ordered findings + aggregate verdict + the canonical inputs and
//! their snapshot hash.

#![forbid(unsafe_code)]

pub mod canonical;
pub mod error;
pub mod graph;
pub mod report;
pub mod template;

mod engine;

pub use engine::{evaluate_rule_graph, EvaluateOptions};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
