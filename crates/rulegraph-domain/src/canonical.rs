//! Canonical form and snapshot hashing for input snapshots.
//!
//! Two snapshots that differ only in object key order or numeric
//! representation must hash identically, so audit trails can compare
//! evaluations by hash alone. Canonicalization sorts keys recursively; the
//! stable serializer renders every number through an arbitrary-precision
//! decimal formatter and emits it as a quoted string token, which keeps the
//! hash independent of float formatting.

use rust_decimal::prelude::*;
use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};

/// Largest integer exactly representable as an IEEE double (2^53 - 1).
/// Identifiers beyond it are normalized to decimal strings so no consumer
/// ever sees a rounded ID.
const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Recursively sort object keys and normalize scalars.
///
/// Arrays keep their order; strings pass through byte-for-byte (timestamps
/// arrive already serialized as RFC 3339 text). Pure and total.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => canonicalize_number(n),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::new();
            for (key, item) in entries {
                out.insert(key.clone(), canonicalize(item));
            }
            Value::Object(out)
        }
    }
}

fn canonicalize_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        if i.unsigned_abs() > MAX_SAFE_INTEGER {
            return Value::String(i.to_string());
        }
    } else if let Some(u) = n.as_u64() {
        if u > MAX_SAFE_INTEGER {
            return Value::String(u.to_string());
        }
    }
    Value::Number(n.clone())
}

/// Serialize to compact JSON with sorted keys and decimal-string numbers.
///
/// Numbers become quoted JSON strings (`{"fico":"610"}`), so `610`, `610.0`,
/// and any other representation of the same value serialize identically.
pub fn stable_stringify(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Canonicalize, stable-stringify, and SHA-256 the result (lowercase hex).
pub fn compute_snapshot_hash(inputs: &Value) -> String {
    let canonical = stable_stringify(&canonicalize(inputs));

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

/// Render a JSON number the way the stable serializer and the template
/// renderer both need it: exact decimal digits, no float artifacts, no
/// exponent notation within `Decimal` range.
pub(crate) fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64().and_then(Decimal::from_f64) {
        Some(decimal) => decimal.normalize().to_string(),
        // Magnitudes outside Decimal's range; fall back to the JSON rendering.
        None => n.to_string(),
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => {
            out.push('"');
            out.push_str(&format_number(n));
            out.push('"');
        }
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonicalize_sorts_keys_recursively() {
        let value = json!({
            "loan": { "termMonths": 360, "amount": 250000 },
            "borrower": { "name": "Dana Fox", "fico": 610 },
        });
        let canonical = canonicalize(&value);
        let keys: Vec<&String> = canonical.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["borrower", "loan"]);
        let loan_keys: Vec<&String> = canonical["loan"].as_object().unwrap().keys().collect();
        assert_eq!(loan_keys, ["amount", "termMonths"]);
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let value = json!({
            "z": [1, { "b": 2, "a": null }],
            "a": "text",
        });
        let once = canonicalize(&value);
        assert_eq!(canonicalize(&once), once);
    }

    #[test]
    fn canonicalize_preserves_array_order() {
        let value = json!({ "flags": ["HPML", "QM", "ATR"] });
        let canonical = canonicalize(&value);
        assert_eq!(canonical["flags"], json!(["HPML", "QM", "ATR"]));
    }

    #[test]
    fn oversized_integers_become_strings() {
        let value = json!({ "id": 9_007_199_254_740_993u64 });
        let canonical = canonicalize(&value);
        assert_eq!(canonical["id"], json!("9007199254740993"));
        // The boundary value itself stays numeric.
        let edge = canonicalize(&json!({ "id": 9_007_199_254_740_991u64 }));
        assert_eq!(edge["id"], json!(9_007_199_254_740_991u64));
    }

    #[test]
    fn stable_stringify_quotes_numbers_as_decimal_strings() {
        assert_eq!(
            stable_stringify(&json!({ "fico": 610 })),
            r#"{"fico":"610"}"#
        );
        assert_eq!(stable_stringify(&json!({ "rate": 0.25 })), r#"{"rate":"0.25"}"#);
        assert_eq!(stable_stringify(&json!([1, 2.5, null, true])), r#"["1","2.5",null,true]"#);
    }

    #[test]
    fn equal_values_serialize_identically_across_representations() {
        assert_eq!(
            stable_stringify(&json!({ "fico": 610 })),
            stable_stringify(&json!({ "fico": 610.0 })),
        );
    }

    #[test]
    fn stable_stringify_escapes_strings_like_json() {
        assert_eq!(
            stable_stringify(&json!({ "note": "line\nbreak \"q\" \\ tab\t" })),
            r#"{"note":"line\nbreak \"q\" \\ tab\t"}"#
        );
        assert_eq!(
            stable_stringify(&json!("control \u{1}")),
            "\"control \\u0001\""
        );
    }

    #[test]
    fn snapshot_hash_ignores_key_order() {
        let a = json!({ "b": 1, "a": 2 });
        let b = json!({ "a": 2, "b": 1 });
        assert_eq!(compute_snapshot_hash(&a), compute_snapshot_hash(&b));
        assert_eq!(
            compute_snapshot_hash(&a),
            "f7a837dc9b605d08d450f14bb4927ae8ab268b757d17b579b4e8e61500d87c4a"
        );
    }

    #[test]
    fn snapshot_hash_known_vector() {
        // sha256 of `{"borrower":{"fico":"610"}}`.
        let inputs = json!({ "borrower": { "fico": 610 } });
        assert_eq!(
            compute_snapshot_hash(&inputs),
            "84706c9b4aa6e7e8223e9e039ec20471afa9037e484e6ab8f147ef2d5e7d0c1c"
        );
    }

    #[test]
    fn format_number_strips_float_artifacts() {
        let n = serde_json::Number::from_f64(2.50).unwrap();
        assert_eq!(format_number(&n), "2.5");
        let whole = serde_json::Number::from_f64(610.0).unwrap();
        assert_eq!(format_number(&whole), "610");
        let tenth = serde_json::Number::from_f64(0.1).unwrap();
        assert_eq!(format_number(&tenth), "0.1");
    }
}
