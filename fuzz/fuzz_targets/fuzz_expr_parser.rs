//! Fuzz target for expression parsing and evaluation.
//!
//! Goal: The parser and evaluator should **never panic** on any input.
//! They may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_expr_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    // Limit input size to keep fuzzing fast; member chains grow the tree
    // linearly with the source, so this also bounds evaluation recursion
    if data.len() > 4096 {
        return;
    }

    // Only test valid UTF-8 strings (rule expressions are UTF-8)
    if let Ok(text) = std::str::from_utf8(data) {
        // Parsing arbitrary text - should never panic
        if let Ok(expr) = rulegraph_expr::parse(text) {
            // Evaluating a parsed expression - should never panic either,
            // whatever the expression resolves (or fails to resolve) to.
            let env = json!({
                "inputs": {
                    "borrower": { "fico": 610, "name": "Dana Fox" },
                    "loan": { "amount": 250000, "flags": ["HPML", "QM"] },
                },
                "asOf": "2026-01-15T00:00:00Z",
                "dependencies": { "FICO_MIN": "fail" },
            });
            let _ = expr.evaluate_bool(&env);
            let _ = expr.evaluate(&env);
        }
    }
});
