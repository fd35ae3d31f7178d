//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Canonicalization idempotence and hash stability
//! - Stable serialization agreement with the canonical form
//! - Template rendering totality
//! - Topological ordering of generated DAGs
//! - Evaluation determinism and severity aggregation

use crate::canonical::{canonicalize, compute_snapshot_hash, stable_stringify};
use crate::graph::sort_rules;
use crate::template::render;
use crate::test_support::{rule, warn_rule, with_dependencies};
use crate::{evaluate_rule_graph, EvaluateOptions};
use proptest::prelude::*;
use rulegraph_types::{RuleDefinition, Severity};
use serde_json::{json, Value as JsonValue};
use std::collections::BTreeMap;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for JSON scalars. Floats stay finite; JSON has no NaN or
/// infinities.
fn arb_scalar() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e9f64..1.0e9f64).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 _.-]{0,12}".prop_map(JsonValue::String),
    ]
}

/// Strategy for JSON trees a few levels deep.
fn arb_json() -> impl Strategy<Value = JsonValue> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|map| JsonValue::Object(map.into_iter().collect())),
        ]
    })
}

/// Strategy for template strings, biased toward placeholder syntax.
fn arb_template() -> impl Strategy<Value = String> {
    prop_oneof![
        ".{0,32}",
        r"[a-z ]{0,8}\{\{[a-z.]{1,12}\}\}[a-z ]{0,8}",
        r"\{\{ *\}\}.{0,8}",
    ]
}

/// Strategy for acyclic rule graphs. Each entry is
/// `(dependency indices, triggered, warn-instead-of-fail)`; rule `i` may
/// only depend on rules with smaller indices, so cycles are
/// unrepresentable.
fn arb_dag() -> impl Strategy<Value = Vec<(Vec<usize>, bool, bool)>> {
    (2usize..8).prop_flat_map(|n| {
        prop::collection::vec(
            (
                prop::collection::btree_set(0usize..n, 0..3),
                any::<bool>(),
                any::<bool>(),
            ),
            n,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (deps, triggered, warn))| {
                    let deps: Vec<usize> = deps.into_iter().filter(|&d| d < i).collect();
                    (deps, triggered, warn)
                })
                .collect()
        })
    })
}

fn build_rules(specs: &[(Vec<usize>, bool, bool)]) -> Vec<RuleDefinition> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (deps, triggered, warn))| {
            let expression = if *triggered { "1 < 2" } else { "1 > 2" };
            let base = if *warn {
                warn_rule(&format!("R{i}"), expression)
            } else {
                rule(&format!("R{i}"), expression)
            };
            let dep_codes: Vec<String> = deps.iter().map(|d| format!("R{d}")).collect();
            let dep_refs: Vec<&str> = dep_codes.iter().map(String::as_str).collect();
            with_dependencies(base, &dep_refs)
        })
        .collect()
}

fn spec_index(code: &str) -> usize {
    code[1..].parse().unwrap_or(0)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Canonicalizing twice is the same as canonicalizing once.
    #[test]
    fn canonicalize_is_idempotent(value in arb_json()) {
        let once = canonicalize(&value);
        prop_assert_eq!(canonicalize(&once), once);
    }

    /// The snapshot hash does not change under canonicalization.
    #[test]
    fn hash_is_stable_under_canonicalization(value in arb_json()) {
        prop_assert_eq!(
            compute_snapshot_hash(&value),
            compute_snapshot_hash(&canonicalize(&value))
        );
    }

    /// The stable serializer sorts keys itself, so pre-canonicalizing never
    /// changes its output (including the oversized-integer string rewrite,
    /// which lands on the same quoted text either way).
    #[test]
    fn stringify_agrees_with_canonical_form(value in arb_json()) {
        prop_assert_eq!(
            stable_stringify(&value),
            stable_stringify(&canonicalize(&value))
        );
    }

    /// Rendering is total and deterministic for any template/context pair.
    #[test]
    fn render_is_total_and_deterministic(template in arb_template(), context in arb_json()) {
        let first = render(&template, &context);
        prop_assert_eq!(first, render(&template, &context));
    }

    /// Topological sort emits a permutation of its input with every
    /// dependency placed before its dependents.
    #[test]
    fn sort_respects_dependencies(specs in arb_dag()) {
        let rules = build_rules(&specs);
        let ordered = sort_rules(&rules).unwrap();

        let mut in_codes: Vec<&str> = rules.iter().map(|r| r.code.as_str()).collect();
        let mut out_codes: Vec<&str> = ordered.iter().map(|r| r.code.as_str()).collect();
        in_codes.sort_unstable();
        out_codes.sort_unstable();
        prop_assert_eq!(in_codes, out_codes);

        let position: BTreeMap<&str, usize> = ordered
            .iter()
            .enumerate()
            .map(|(i, r)| (r.code.as_str(), i))
            .collect();
        for def in &rules {
            for dep in &def.dependencies {
                let dep_pos = position.get(dep.as_str()).copied();
                let rule_pos = position.get(def.code.as_str()).copied();
                prop_assert!(
                    dep_pos.is_some() && rule_pos.is_some() && dep_pos < rule_pos,
                    "dependency {} must precede {}",
                    dep,
                    def.code
                );
            }
        }
    }

    /// The verdict is exactly the maximum severity of triggered rules, and
    /// findings appear in evaluation order on every run.
    #[test]
    fn evaluation_is_deterministic_and_aggregates_the_maximum(specs in arb_dag()) {
        let rules = build_rules(&specs);
        let opts = EvaluateOptions {
            as_of: "2026-01-15T00:00:00Z".to_string(),
            shadow: false,
            include_pass_findings: false,
        };
        let inputs = json!({});

        let first = evaluate_rule_graph(&rules, &inputs, &opts).unwrap();
        let second = evaluate_rule_graph(&rules, &inputs, &opts).unwrap();
        prop_assert_eq!(first.result, second.result);
        prop_assert_eq!(&first.findings, &second.findings);
        prop_assert_eq!(&first.inputs_snapshot_hash, &second.inputs_snapshot_hash);

        let mut expected = Severity::Pass;
        for (_, triggered, warn) in &specs {
            if *triggered {
                expected = expected.max(if *warn { Severity::Warn } else { Severity::Fail });
            }
        }
        prop_assert_eq!(first.result, expected);

        let ordered = sort_rules(&rules).unwrap();
        let expected_codes: Vec<&str> = ordered
            .iter()
            .filter(|r| specs[spec_index(&r.code)].1)
            .map(|r| r.code.as_str())
            .collect();
        let actual_codes: Vec<&str> = first.findings.iter().map(|f| f.code.as_str()).collect();
        prop_assert_eq!(actual_codes, expected_codes);
    }
}
