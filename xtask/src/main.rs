//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use rulegraph_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            // Fallback: assume we're in xtask dir or use current dir
            std::env::current_dir().expect("Cannot determine current directory")
        });

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .expect("xtask has no parent")
            .to_path_buf()
    } else {
        manifest_dir
    }
}

/// Get the schemas directory path.
fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

/// Get the tests/fixtures directory path.
fn tests_fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

/// Generate the EvaluationReport schema.
fn generate_report_schema() -> schemars::Schema {
    schema_for!(rulegraph_types::EvaluationReport)
}

/// Generate the RuleSetFile schema.
fn generate_rules_schema() -> schemars::Schema {
    schema_for!(rulegraph_types::RuleSetFile)
}

/// List of schemas to generate.
fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "rulegraph.evaluation.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "rulegraph.rules.v1.json",
            generate: generate_rules_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();

    // Ensure schemas directory exists
    if !dir.exists() {
        fs::create_dir_all(&dir).context("Failed to create schemas directory")?;
    }

    for spec in schema_specs() {
        let schema = (spec.generate)();
        let json = serialize_schema(&schema)?;
        let path = dir.join(spec.filename);

        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;

        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
/// Returns Ok(()) if all schemas match, Err otherwise.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut all_match = true;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);

        if !path.exists() {
            missing.push(spec.filename);
            all_match = false;
            continue;
        }

        let schema = (spec.generate)();
        let expected = serialize_schema(&schema)?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if expected != actual {
            mismatched.push(spec.filename);
            all_match = false;
        }
    }

    if all_match {
        println!("All schemas are up to date.");
        Ok(())
    } else {
        if !missing.is_empty() {
            eprintln!("Missing schemas:");
            for name in &missing {
                eprintln!("  - {}", name);
            }
        }
        if !mismatched.is_empty() {
            eprintln!("Schemas out of date:");
            for name in &mismatched {
                eprintln!("  - {}", name);
            }
        }
        eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
        bail!("Schema validation failed")
    }
}

/// Compile a generated schema into a validator.
fn compile_schema(generate: fn() -> schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(generate()).context("Failed to serialize schema")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))
}

/// Validate fixture documents against the generated schemas.
///
/// This checks, for every fixture under tests/fixtures/:
/// 1. rules.json validates against the rulegraph.rules.v1 schema
/// 2. expected.report.json validates against the rulegraph.evaluation.v1 schema
/// 3. the golden report is already normalized (`__TIMESTAMP__`/`__VERSION__`
///    placeholders, latency pinned), so fixture diffs stay reviewable
fn conform() -> anyhow::Result<()> {
    let report_validator = compile_schema(generate_report_schema)?;
    println!("✓ rulegraph.evaluation.v1 schema compiles");
    let rules_validator = compile_schema(generate_rules_schema)?;
    println!("✓ rulegraph.rules.v1 schema compiles");

    let fixtures_dir = tests_fixtures_dir();
    if !fixtures_dir.exists() {
        bail!(
            "tests/fixtures/ not found at {}\n\n\
            Create evaluation fixtures first.",
            fixtures_dir.display()
        );
    }

    let mut fixture_count = 0;
    let mut errors = Vec::new();

    for entry in fs::read_dir(&fixtures_dir).context("Failed to read tests/fixtures/")? {
        let entry = entry?;
        let fixture_dir = entry.path();
        if !fixture_dir.is_dir() {
            continue;
        }

        let fixture_name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let rules_path = fixture_dir.join("rules.json");
        let golden_path = fixture_dir.join("expected.report.json");
        if !rules_path.exists() || !golden_path.exists() {
            errors.push(format!(
                "fixture '{}': rules.json and expected.report.json are both required",
                fixture_name
            ));
            continue;
        }

        let rules_content = fs::read_to_string(&rules_path)
            .with_context(|| format!("Failed to read {}", rules_path.display()))?;
        let rules_value: serde_json::Value = serde_json::from_str(&rules_content)
            .with_context(|| format!("Failed to parse {} as JSON", rules_path.display()))?;
        for err in rules_validator.iter_errors(&rules_value) {
            errors.push(format!("{}: rules schema validation: {}", fixture_name, err));
        }

        let golden_content = fs::read_to_string(&golden_path)
            .with_context(|| format!("Failed to read {}", golden_path.display()))?;
        let golden_value: serde_json::Value = serde_json::from_str(&golden_content)
            .with_context(|| format!("Failed to parse {} as JSON", golden_path.display()))?;
        for err in report_validator.iter_errors(&golden_value) {
            errors.push(format!(
                "{}: report schema validation: {}",
                fixture_name, err
            ));
        }

        if normalize_nondeterministic(golden_value.clone()) != golden_value {
            errors.push(format!(
                "{}: expected.report.json is not normalized (timestamps, tool version, or latency)",
                fixture_name
            ));
        }

        fixture_count += 1;
        println!("  ✓ {} validates", fixture_name);
    }

    if fixture_count == 0 {
        bail!("No fixtures found in {}", fixtures_dir.display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixtures pass conformance checks!", fixture_count);
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate tests/fixtures documents against the generated schemas");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                let name = spec.filename.trim_end_matches(".json");
                println!("{}", name);
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
