//! Core types for check results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule names for the citation checks, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    #[serde(rename = "year_letter")]
    YearLetter,
    #[serde(rename = "et_al_comma")]
    EtAlComma,
    #[serde(rename = "title_case")]
    TitleCase,
    #[serde(rename = "period_space")]
    PeriodSpace,
    #[serde(rename = "join_citations")]
    JoinCitations,
    #[serde(rename = "citation_before_period")]
    CitationBeforePeriod,
    #[serde(rename = "bracket_ampersand")]
    BracketAmpersand,
    #[serde(rename = "prose_and")]
    ProseAnd,
}

impl Rule {
    /// Every rule, in the order the engine applies them.
    pub const ALL: [Rule; 8] = [
        Rule::YearLetter,
        Rule::EtAlComma,
        Rule::TitleCase,
        Rule::PeriodSpace,
        Rule::JoinCitations,
        Rule::CitationBeforePeriod,
        Rule::BracketAmpersand,
        Rule::ProseAnd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::YearLetter => "year_letter",
            Rule::EtAlComma => "et_al_comma",
            Rule::TitleCase => "title_case",
            Rule::PeriodSpace => "period_space",
            Rule::JoinCitations => "join_citations",
            Rule::CitationBeforePeriod => "citation_before_period",
            Rule::BracketAmpersand => "bracket_ampersand",
            Rule::ProseAnd => "prose_and",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "year_letter" => Some(Rule::YearLetter),
            "et_al_comma" => Some(Rule::EtAlComma),
            "title_case" => Some(Rule::TitleCase),
            "period_space" => Some(Rule::PeriodSpace),
            "join_citations" => Some(Rule::JoinCitations),
            "citation_before_period" => Some(Rule::CitationBeforePeriod),
            "bracket_ampersand" => Some(Rule::BracketAmpersand),
            "prose_and" => Some(Rule::ProseAnd),
            _ => None,
        }
    }

    /// Explanation shown to the writer.
    pub fn feedback(&self) -> &'static str {
        match self {
            Rule::YearLetter => "Letters that appear immediately after a year should be lowercase.",
            Rule::EtAlComma => "Do not put a comma before 'et al.'",
            Rule::TitleCase => "If this is an article title, consider using lowercase.",
            Rule::PeriodSpace => "Every period should be followed by a space.",
            Rule::JoinCitations => "Multiple parentheticals should be combined using a semicolon.",
            Rule::CitationBeforePeriod => {
                "In text citations belong as part of the preceding sentence. Place the period after the citation."
            }
            Rule::BracketAmpersand => "Use & to separate bracketed author names.",
            Rule::ProseAnd => "Use 'and' to separate author names outside of brackets.",
        }
    }

    /// External style guide reference, if one exists.
    pub fn see_also(&self) -> Option<&'static str> {
        match self {
            Rule::EtAlComma => {
                Some("http://academicguides.waldenu.edu/writingcenter/apa/citations/etal")
            }
            Rule::JoinCitations => {
                Some("http://www.apastyle.org/learn/faqs/references-in-parentheses.aspx")
            }
            _ => None,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::parse(s).ok_or_else(|| format!("unknown rule: {}", s))
    }
}

/// A single detected style issue.
///
/// `start` and `end` are character offsets into the scanned text, so the
/// `end - start` characters from `start` spell out `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: Rule,
    pub start: usize,
    pub end: usize,
    pub target: String,
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub see_also: Option<String>,
    pub suggestions: Vec<String>,
}

impl Finding {
    /// 1-based line and column of `start` within `text`. Columns count characters.
    pub fn line_col(&self, text: &str) -> (usize, usize) {
        text.chars()
            .take(self.start)
            .fold((1, 1), |(line, column), ch| {
                if ch == '\n' {
                    (line + 1, 1)
                } else {
                    (line, column + 1)
                }
            })
    }

    /// Write the finding to stdout.
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Match from {} to {} for:", self.start, self.end)?;
        if !self.target.is_empty() {
            writeln!(f, "Target: {}", self.target)?;
        }
        if !self.feedback.is_empty() {
            writeln!(f, "Feedback: {}", self.feedback)?;
        }
        if let Some(see) = self.see_also.as_deref().filter(|s| !s.is_empty()) {
            writeln!(f, "See: {}", see)?;
        }
        for suggestion in &self.suggestions {
            writeln!(f, "Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}
