//! Output formatting for apalint results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - Plain: the `Match from ... Suggestion: ...` block layout, uncolored
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::check::Finding;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Pretty,
    Plain,
    Json,
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub source: String,
    pub count: usize,
    pub findings: Vec<JsonFinding>,
}

/// JSON finding structure, with positions resolved to line and column.
#[derive(Serialize, Deserialize)]
pub struct JsonFinding {
    pub rule: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub target: String,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub see_also: Option<String>,
    pub suggestions: Vec<String>,
}

/// Build the JSON report for a scanned text.
pub fn json_report(source: &str, text: &str, findings: &[Finding]) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: source.to_string(),
        count: findings.len(),
        findings: findings.iter().map(|f| finding_to_json(f, text)).collect(),
    }
}

fn finding_to_json(f: &Finding, text: &str) -> JsonFinding {
    let (line, column) = f.line_col(text);
    JsonFinding {
        rule: f.rule.as_str().to_string(),
        start: f.start,
        end: f.end,
        line,
        column,
        target: f.target.clone(),
        feedback: f.feedback.clone(),
        see_also: f.see_also.clone(),
        suggestions: f.suggestions.clone(),
    }
}

/// Write results in JSON format.
pub fn write_json<W: Write>(
    out: &mut W,
    source: &str,
    text: &str,
    findings: &[Finding],
) -> anyhow::Result<()> {
    let report = json_report(source, text, findings);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// Plain Format
// =============================================================================

/// Write each finding in its block layout, separated by blank lines.
pub fn write_plain<W: Write>(out: &mut W, findings: &[Finding]) -> io::Result<()> {
    for (i, finding) in findings.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "{}", finding)?;
    }
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty<W: Write>(
    out: &mut W,
    source: &str,
    text: &str,
    findings: &[Finding],
) -> io::Result<()> {
    // Header
    writeln!(out)?;
    writeln!(
        out,
        "  {} v{}",
        "apalint".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;
    writeln!(out, "  {}{}", "Checking: ".dimmed(), source)?;
    writeln!(out)?;

    if findings.is_empty() {
        writeln!(out, "  {}", "✓ No citation issues found".green())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "  {} ({}):", "Findings".bold(), findings.len())?;
    writeln!(out)?;

    for f in findings {
        write_finding(out, text, f)?;
    }

    let plural = if findings.len() != 1 { "s" } else { "" };
    writeln!(
        out,
        "  {}",
        format!("✗ {} citation issue{}", findings.len(), plural).red()
    )?;
    writeln!(out)?;
    Ok(())
}

fn write_finding<W: Write>(out: &mut W, text: &str, f: &Finding) -> io::Result<()> {
    let (line, column) = f.line_col(text);
    writeln!(
        out,
        "    {:<24}{}",
        f.rule.as_str().yellow(),
        format!("{}:{}", line, column).dimmed()
    )?;
    writeln!(out, "            {}", f.target.blue())?;
    writeln!(out, "            {}", f.feedback)?;
    if let Some(see) = &f.see_also {
        writeln!(out, "            {}", format!("see: {}", see).dimmed())?;
    }
    for s in &f.suggestions {
        writeln!(out, "            {} {}", "→".green(), s.green())?;
    }
    writeln!(out)?;
    Ok(())
}
