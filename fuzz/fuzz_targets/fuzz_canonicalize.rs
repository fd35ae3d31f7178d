//! Fuzz target for canonicalization and snapshot hashing.
//!
//! Goal: Canonicalization should **never panic**, should be idempotent, and
//! two canonicalizations of the same value must hash identically.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_canonicalize
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rulegraph_domain::canonical::{canonicalize, compute_snapshot_hash, stable_stringify};
use serde_json::{Map, Number, Value};

#[derive(Arbitrary, Debug)]
enum FuzzJson {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<FuzzJson>),
    Object(Vec<(String, FuzzJson)>),
}

impl FuzzJson {
    fn into_value(self) -> Value {
        match self {
            FuzzJson::Null => Value::Null,
            FuzzJson::Bool(b) => Value::Bool(b),
            FuzzJson::Int(i) => Value::Number(i.into()),
            // Non-finite floats have no JSON representation
            FuzzJson::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            FuzzJson::Str(s) => Value::String(s),
            FuzzJson::Array(items) => {
                Value::Array(items.into_iter().map(FuzzJson::into_value).collect())
            }
            FuzzJson::Object(entries) => {
                let mut map = Map::new();
                for (key, item) in entries {
                    map.insert(key, item.into_value());
                }
                Value::Object(map)
            }
        }
    }
}

fuzz_target!(|input: FuzzJson| {
    let value = input.into_value();

    // Should never panic
    let canonical = canonicalize(&value);

    // Idempotent: a second pass is a no-op
    assert_eq!(canonicalize(&canonical), canonical);

    // The stable serialization agrees before and after canonicalization,
    // so the hash does too
    assert_eq!(stable_stringify(&canonical), stable_stringify(&canonicalize(&canonical)));
    assert_eq!(compute_snapshot_hash(&value), compute_snapshot_hash(&canonical));
});
