//! CLI entry point for rulegraph.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `rulegraph-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use rulegraph_app::{
    format_not_found, format_order, format_rule, parse_report_json, parse_rules_json,
    render_markdown, run_evaluate, run_explain, run_hash, run_lint, runtime_error_report,
    serialize_report, verdict_exit_code, EvaluateInput, ExplainOutput, LintOutcome,
};
use rulegraph_types::EvaluationReport;

#[derive(Parser, Debug)]
#[command(
    name = "rulegraph",
    version,
    about = "Deterministic rule-graph evaluation for regulated policy decisions"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a rule graph against an input snapshot and write artifacts.
    Evaluate(EvaluateArgs),

    /// Validate a rules document without evaluating it.
    Lint {
        /// Path to the rules JSON document.
        #[arg(long)]
        rules: Utf8PathBuf,
    },

    /// Canonicalize an input snapshot and print its hash.
    Hash {
        /// Path to the input snapshot JSON document.
        #[arg(long)]
        inputs: Utf8PathBuf,

        /// Also print the canonical JSON document.
        #[arg(long)]
        canonical: bool,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/rulegraph/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Show one rule from a rules document.
    Explain {
        /// Path to the rules JSON document.
        #[arg(long)]
        rules: Utf8PathBuf,

        /// The rule code to explain (e.g. "FICO_MIN").
        code: String,
    },
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Path to the rules JSON document.
    #[arg(long)]
    rules: Utf8PathBuf,

    /// Path to the input snapshot JSON document.
    #[arg(long)]
    inputs: Utf8PathBuf,

    /// Decision timestamp (RFC 3339), e.g. 2026-01-15T00:00:00Z.
    #[arg(long)]
    as_of: String,

    /// Record the run as a shadow evaluation (verdict is advisory).
    #[arg(long)]
    shadow: bool,

    /// Include pass findings in the report.
    #[arg(long)]
    include_pass_findings: bool,

    /// Where to write the JSON report.
    #[arg(long, default_value = "artifacts/rulegraph/report.json")]
    report_out: Utf8PathBuf,

    /// Write a Markdown summary alongside the JSON.
    #[arg(long)]
    write_markdown: bool,

    /// Where to write the Markdown summary (if enabled).
    #[arg(long, default_value = "artifacts/rulegraph/summary.md")]
    markdown_out: Utf8PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Evaluate(args) => cmd_evaluate(args),
        Commands::Lint { rules } => cmd_lint(rules),
        Commands::Hash { inputs, canonical } => cmd_hash(inputs, canonical),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Explain { rules, code } => cmd_explain(rules, &code),
    }
}

fn cmd_evaluate(args: EvaluateArgs) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let rules_text = std::fs::read_to_string(&args.rules)
            .with_context(|| format!("read rules: {}", args.rules))?;
        let inputs_text = std::fs::read_to_string(&args.inputs)
            .with_context(|| format!("read inputs: {}", args.inputs))?;

        let output = run_evaluate(EvaluateInput {
            rules_text: &rules_text,
            inputs_text: &inputs_text,
            as_of: &args.as_of,
            shadow: args.shadow,
            include_pass_findings: args.include_pass_findings,
        })?;

        write_report_file(&args.report_out, &output.report).context("write report json")?;

        if args.write_markdown {
            let md = render_markdown(&output.report);
            write_text_file(&args.markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            // A failed run still writes a receipt.
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(&args.report_out, &report);
            eprintln!("rulegraph error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_lint(rules_path: Utf8PathBuf) -> anyhow::Result<()> {
    let rules_text = std::fs::read_to_string(&rules_path)
        .with_context(|| format!("read rules: {}", rules_path))?;
    let file = parse_rules_json(&rules_text)?;

    match run_lint(&file.rules) {
        LintOutcome::Valid { order } => {
            print!("{}", format_order(&order));
            Ok(())
        }
        LintOutcome::Invalid { error } => {
            eprintln!("rulegraph lint: {error}");
            std::process::exit(2);
        }
    }
}

fn cmd_hash(inputs_path: Utf8PathBuf, canonical: bool) -> anyhow::Result<()> {
    let inputs_text = std::fs::read_to_string(&inputs_path)
        .with_context(|| format!("read inputs: {}", inputs_path))?;
    let output = run_hash(&inputs_text)?;

    println!("{}", output.hash);
    if canonical {
        println!("{}", output.canonical_json);
    }

    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_explain(rules_path: Utf8PathBuf, code: &str) -> anyhow::Result<()> {
    let rules_text = std::fs::read_to_string(&rules_path)
        .with_context(|| format!("read rules: {}", rules_path))?;
    let file = parse_rules_json(&rules_text)?;

    match run_explain(&file.rules, code) {
        ExplainOutput::Found(rule) => {
            print!("{}", format_rule(&rule));
            Ok(())
        }
        ExplainOutput::NotFound {
            code,
            available_codes,
        } => {
            eprint!("{}", format_not_found(&code, &available_codes));
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &camino::Utf8Path, report: &EvaluationReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &camino::Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}
