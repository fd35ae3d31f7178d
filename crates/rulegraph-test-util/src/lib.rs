//! Shared test utilities for the rulegraph workspace.
//!
//! This crate exists because the CLI fixture tests and `xtask` both need
//! `normalize_nondeterministic` at runtime (not behind `#[cfg(test)]`), so a
//! `#[cfg(test)]` module inside `rulegraph-types` would not suffice.

use serde_json::Value;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Two concerns are handled separately:
///
/// 1. **Root-only**: `tool.version` is replaced with `"__VERSION__"` only
///    when the *root* object looks like a report envelope (has all of
///    `schema`, `tool`, `verdict`, `findings`, `data`).  This prevents false
///    normalization of nested objects that happen to share the same shape
///    (e.g. an action payload carrying a `tool` object of its own).
///
/// 2. **Recursive**: timestamp keys (`started_at`, `finished_at`) and
///    `latency_ms` are normalized at any depth because their placeholder
///    values are fixed and cannot collide with real data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    // Root-only: normalize tool.version if this is an envelope
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("verdict")
            && obj.contains_key("findings")
            && obj.contains_key("data");
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("name")
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    // Recursive: timestamps and latency at any depth
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.contains_key("started_at") {
                map.insert(
                    "started_at".to_string(),
                    Value::String("__TIMESTAMP__".to_string()),
                );
            }
            if map.contains_key("finished_at") {
                map.insert(
                    "finished_at".to_string(),
                    Value::String("__TIMESTAMP__".to_string()),
                );
            }
            if map.contains_key("latency_ms") {
                map.insert("latency_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
