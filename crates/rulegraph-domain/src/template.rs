//! Message and explanation templating.
//!
//! `{{ dotted.path }}` placeholders resolve against a JSON context. Missing
//! or null paths render as the empty string; rendering never fails. Resolved
//! values are never re-scanned, so a template smuggled into input data
//! cannot expand.

use crate::canonical::format_number;
use serde_json::Value;

/// Render `template` against `context`.
///
/// A placeholder whose inner text is empty, contains whitespace, or contains
/// `}` is not a placeholder; the braces stay literal and scanning resumes
/// just past them. Numbers render through the decimal formatter, booleans as
/// `true`/`false`, arrays and objects as compact JSON.
pub fn render(template: &str, context: &Value) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            // No closing braces anywhere ahead; the tail is literal.
            out.push_str(&rest[open..]);
            return out;
        };
        let path = after_open[..close].trim();
        if path.is_empty() || path.contains(char::is_whitespace) || path.contains('}') {
            out.push_str("{{");
            rest = after_open;
            continue;
        }
        out.push_str(&rendered_value(resolve_path(context, path)));
        rest = &after_open[close + 2..];
    }

    out.push_str(rest);
    out
}

fn resolve_path<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = context;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn rendered_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Number(n)) => format_number(n),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}
