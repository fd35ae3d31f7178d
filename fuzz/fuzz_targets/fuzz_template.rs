//! Fuzz target for template rendering.
//!
//! Goal: Rendering is total; it should **never panic** and never error,
//! whatever the template text or context shape.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_template
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Number, Value};

/// Structured input for template fuzzing.
/// Using Arbitrary allows libFuzzer to generate more meaningful test cases.
#[derive(Arbitrary, Debug)]
struct TemplateInput {
    template: String,
    context: FuzzJson,
}

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

fuzz_target!(|input: TemplateInput| {
    // Limit input size to avoid OOM and keep fuzzing fast
    if input.template.len() > 4096 {
        return;
    }

    let context = input.context.into_value();

    // Should never panic; rendering has no error path
    let _ = rulegraph_domain::template::render(&input.template, &context);
});
