//! The rule-graph evaluator.
//!
//! Deterministic by construction: fixed definitions and inputs produce the
//! same hash, the same findings in the same order, and the same verdict on
//! every call. Everything is synchronous and in-memory.

use crate::canonical::{canonicalize, compute_snapshot_hash};
use crate::error::{EvaluateError, ValidationError};
use crate::graph::sort_rules;
use crate::report::EvaluationSummary;
use crate::template::render;
use rulegraph_types::{EvaluationFinding, RuleDefinition, RuleDependencyOutcome, Severity};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Instant;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Per-run evaluation options.
#[derive(Clone, Debug)]
pub struct EvaluateOptions {
    /// Policy-effective timestamp, RFC 3339. Exposed to expressions and
    /// templates as `asOf`.
    pub as_of: String,
    /// Shadow runs evaluate everything, actions included; the flag is echoed
    /// in the report so downstream systems know not to execute them.
    pub shadow: bool,
    /// Report findings for passed rules too.
    pub include_pass_findings: bool,
}

/// Evaluate a rule graph against an input snapshot.
///
/// Rules run in dependency order; each sees the canonical inputs, `asOf`,
/// and the outcomes of its declared dependencies only. Any graph,
/// expression, or validation error aborts the whole run; there is never a
/// partial summary.
pub fn evaluate_rule_graph(
    definitions: &[RuleDefinition],
    inputs: &Value,
    options: &EvaluateOptions,
) -> Result<EvaluationSummary, EvaluateError> {
    let started = Instant::now();

    if OffsetDateTime::parse(&options.as_of, &Rfc3339).is_err() {
        return Err(ValidationError::InvalidAsOf {
            value: options.as_of.clone(),
        }
        .into());
    }

    // Hash the inputs exactly as given; evaluate against the canonical form.
    let inputs_snapshot_hash = compute_snapshot_hash(inputs);
    let inputs_canonical = canonicalize(inputs);

    let ordered = sort_rules(definitions)?;

    // Both environments are built once; only the per-rule slots change.
    let mut expr_env = base_env(&inputs_canonical, &options.as_of);
    let mut template_ctx = base_env(&inputs_canonical, &options.as_of);

    let mut outcomes: BTreeMap<String, RuleDependencyOutcome> = BTreeMap::new();
    let mut findings: Vec<EvaluationFinding> = Vec::new();
    let mut actions: Vec<Value> = Vec::new();
    let mut aggregate = Severity::Pass;

    for rule in &ordered {
        // This rule sees outcomes for its declared dependencies only.
        let dependencies = declared_outcomes(rule, &outcomes);
        set_slot(
            &mut expr_env,
            "dependencies",
            Value::Object(dependencies.clone()),
        );

        let expr = rulegraph_expr::parse(&rule.expression)
            .map_err(|source| expression_error(rule, source))?;
        let triggered = expr
            .evaluate_bool(&expr_env)
            .map_err(|source| expression_error(rule, source))?;

        let severity = if triggered {
            Severity::from(rule.severity_on_fail)
        } else {
            Severity::Pass
        };
        aggregate = aggregate.max(severity);

        set_slot(&mut template_ctx, "dependencies", Value::Object(dependencies));
        set_slot(&mut template_ctx, "triggered", Value::Bool(triggered));
        set_slot(
            &mut template_ctx,
            "severity",
            Value::String(severity.as_str().to_string()),
        );

        let message = build_message(rule, triggered, &template_ctx);
        let explain = build_explain(rule, triggered, &template_ctx);

        let action_payload = if triggered {
            rule.actions_on_fail.clone()
        } else {
            None
        };
        if let Some(payload) = &action_payload {
            actions.push(payload.clone());
        }

        if options.include_pass_findings || severity != Severity::Pass {
            findings.push(EvaluationFinding {
                code: rule.code.clone(),
                severity,
                message,
                explain,
                rule_version_id: rule.version_id.clone(),
                title: rule.title.clone(),
                citations: rule.citations.clone(),
                actions: action_payload,
            });
        }

        outcomes.insert(
            rule.code.clone(),
            RuleDependencyOutcome {
                code: rule.code.clone(),
                result: severity,
                triggered,
            },
        );
    }

    Ok(EvaluationSummary {
        result: aggregate,
        findings,
        actions,
        inputs_snapshot_hash,
        inputs_canonical,
        latency_ms: started.elapsed().as_millis() as u64,
    })
}

/// The shared environment shape. `asOf` stays camelCase: it is part of the
/// expression-language surface rule authors write against. The template
/// context adds `triggered` and `severity` slots per rule.
fn base_env(inputs_canonical: &Value, as_of: &str) -> Value {
    let mut map = Map::new();
    map.insert("inputs".to_string(), inputs_canonical.clone());
    map.insert("asOf".to_string(), Value::String(as_of.to_string()));
    map.insert("dependencies".to_string(), Value::Object(Map::new()));
    Value::Object(map)
}

fn set_slot(env: &mut Value, key: &str, value: Value) {
    if let Value::Object(map) = env {
        map.insert(key.to_string(), value);
    }
}

fn declared_outcomes(
    rule: &RuleDefinition,
    outcomes: &BTreeMap<String, RuleDependencyOutcome>,
) -> Map<String, Value> {
    let mut map = Map::new();
    for code in &rule.dependencies {
        // Guaranteed present once the topological sort has run.
        if let Some(outcome) = outcomes.get(code) {
            map.insert(
                code.clone(),
                Value::String(outcome.result.as_str().to_string()),
            );
        }
    }
    map
}

fn expression_error(rule: &RuleDefinition, source: rulegraph_expr::ExprError) -> EvaluateError {
    EvaluateError::Expression {
        code: rule.code.clone(),
        source,
    }
}

/// Triggered: the rendered fail template, or its raw text when the
/// rendering comes back empty. Passed: the rendered pass template, the raw
/// pass template, then `"<title> passed."`. A finding never ships a blank
/// message.
fn build_message(rule: &RuleDefinition, triggered: bool, ctx: &Value) -> String {
    if triggered {
        return non_empty(render(&rule.fail_message, ctx))
            .unwrap_or_else(|| rule.fail_message.clone());
    }
    let pass_template = rule.pass_message.as_deref().unwrap_or("");
    non_empty(render(pass_template, ctx))
        .or_else(|| rule.pass_message.clone().filter(|m| !m.is_empty()))
        .unwrap_or_else(|| format!("{} passed.", rule.title))
}

/// A rule with no pass explanation falls back to its fail-explain template
/// even on the pass path; rendered text falls back to the raw template when
/// empty.
fn build_explain(rule: &RuleDefinition, triggered: bool, ctx: &Value) -> String {
    let template = if triggered {
        rule.fail_explain.as_str()
    } else {
        rule.pass_explain
            .as_deref()
            .unwrap_or(rule.fail_explain.as_str())
    };
    non_empty(render(template, ctx)).unwrap_or_else(|| template.to_string())
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
