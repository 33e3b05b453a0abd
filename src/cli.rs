//! Command-line interface for apalint.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::check::{Finding, Ordering, Rule};
use crate::config::Config;
use crate::report::{self, Format};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// APA citation style checker.
///
/// Scans prose for common citation and reference formatting mistakes and
/// suggests a correction for each one.
#[derive(Parser)]
#[command(name = "apalint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a text for citation style issues
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// List the available rules
    Rules,
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// File to check (reads stdin when omitted)
    #[arg(conflicts_with = "text")]
    pub path: Option<PathBuf>,

    /// Check this text instead of a file
    #[arg(short, long)]
    pub text: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: Format,

    /// Finding order: rule (default) or position
    #[arg(short, long)]
    pub order: Option<Ordering>,

    /// Skip a rule (repeatable)
    #[arg(short, long = "disable", value_name = "RULE")]
    pub disable: Vec<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Where the checked text came from.
struct Input {
    source: String,
    text: String,
}

fn read_input(args: &CheckArgs) -> anyhow::Result<Input> {
    if let Some(text) = &args.text {
        return Ok(Input {
            source: "<text>".to_string(),
            text: text.clone(),
        });
    }

    match &args.path {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            Ok(Input {
                source: path.display().to_string(),
                text: String::from_utf8_lossy(&bytes).into_owned(),
            })
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("cannot read stdin")?;
            Ok(Input {
                source: "<stdin>".to_string(),
                text,
            })
        }
    }
}

fn load_config(args: &CheckArgs) -> anyhow::Result<Config> {
    let path = match &args.config {
        Some(p) => Some(p.clone()),
        None => Config::discover(&std::env::current_dir()?),
    };

    let mut config = match path {
        Some(p) => Config::parse_file(&p)?,
        None => {
            tracing::debug!("no config file found, using defaults");
            Config::default()
        }
    };

    config.disable(&args.disable);
    if let Some(order) = args.order {
        config.order = order;
    }
    config.validate()?;
    Ok(config)
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    let config = match load_config(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let engine = config.engine()?;

    let input = match read_input(args) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    tracing::info!(
        source = %input.source,
        bytes = input.text.len(),
        rules = engine.rules().len(),
        "checking"
    );
    let findings = engine.scan(&input.text);
    tracing::info!(findings = findings.len(), "check complete");

    write_findings(args.format, &input, &findings)?;

    if findings.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

fn write_findings(format: Format, input: &Input, findings: &[Finding]) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Json => report::write_json(&mut out, &input.source, &input.text, findings)?,
        Format::Plain => report::write_plain(&mut out, findings)?,
        Format::Pretty => report::write_pretty(&mut out, &input.source, &input.text, findings)?,
    }
    out.flush()?;
    Ok(())
}

/// List available rules.
pub fn run_rules() -> anyhow::Result<i32> {
    println!("Available rules:");
    println!();

    for rule in Rule::ALL {
        println!("  {:<24} {}", rule.as_str(), rule.feedback());
        if let Some(see) = rule.see_also() {
            println!("  {:<24} see {}", "", see);
        }
    }

    println!();
    println!("Usage:");
    println!("  apalint check <file> --disable <rule>");

    Ok(EXIT_SUCCESS)
}
