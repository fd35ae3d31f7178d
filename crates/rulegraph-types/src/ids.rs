//! Stable identifiers for schemas and synthetic finding codes.
//!
//! Schema IDs are dotted and versioned; bump the suffix on any breaking
//! change to the corresponding document shape.

// Schemas
pub const SCHEMA_EVALUATION_V1: &str = "rulegraph.evaluation.v1";
pub const SCHEMA_RULES_V1: &str = "rulegraph.rules.v1";

// Tool-level
pub const TOOL_NAME: &str = "rulegraph";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
