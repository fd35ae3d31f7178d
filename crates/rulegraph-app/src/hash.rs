//! The `hash` use case: canonicalize an input snapshot and compute its hash.

use anyhow::Context;
use rulegraph_domain::canonical::{canonicalize, compute_snapshot_hash, stable_stringify};
use serde_json::Value as JsonValue;

/// Output from the hash use case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashOutput {
    /// Hex SHA-256 over the stable serialization.
    pub hash: String,
    /// The canonical document text the hash covers.
    pub canonical_json: String,
}

pub fn run_hash(inputs_text: &str) -> anyhow::Result<HashOutput> {
    let inputs: JsonValue = serde_json::from_str(inputs_text).context("parse inputs json")?;
    Ok(HashOutput {
        hash: compute_snapshot_hash(&inputs),
        canonical_json: stable_stringify(&canonicalize(&inputs)),
    })
}
