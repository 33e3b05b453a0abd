//! The rule engine: applies the catalog to a text.

use serde::{Deserialize, Serialize};

use super::{Exemptions, Finding, Rule};

/// Order of findings returned by [`RuleEngine::scan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Grouped by rule in catalog order, each group in text order.
    #[default]
    Rule,
    /// Sorted by position in the text. Ties keep catalog order.
    Position,
}

impl std::str::FromStr for Ordering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rule" => Ok(Ordering::Rule),
            "position" => Ok(Ordering::Position),
            _ => Err(format!("unknown ordering: {}", s)),
        }
    }
}

/// Scans text against a fixed set of citation rules.
///
/// The engine holds no per-scan state; one instance can be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<Rule>,
    ordering: Ordering,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Create an engine running the full catalog.
    pub fn new() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
            ordering: Ordering::Rule,
        }
    }

    /// Restrict the engine to `enabled`. Rules still run in catalog order.
    pub fn with_rules(enabled: &[Rule]) -> Self {
        Self {
            rules: Rule::ALL
                .into_iter()
                .filter(|r| enabled.contains(r))
                .collect(),
            ordering: Ordering::Rule,
        }
    }

    /// Set the order findings are returned in.
    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Rules this engine applies, in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Find every style issue in `text`.
    pub fn scan(&self, text: &str) -> Vec<Finding> {
        let exemptions = Exemptions::collect(text);
        let exemptions = &exemptions;

        let mut findings: Vec<Finding> = self
            .rules
            .iter()
            .flat_map(move |&rule| {
                rule.pattern().find_iter(text).filter_map(move |m| {
                    let start = text[..m.start()].chars().count();
                    let end = start + m.as_str().chars().count();
                    check_match(rule, start, end, m.as_str(), exemptions)
                })
            })
            .collect();

        if self.ordering == Ordering::Position {
            findings.sort_by_key(|f| (f.start, f.end));
        }

        findings
    }
}

/// Turn one pattern match into a finding, or drop it.
///
/// `start` and `end` are character offsets.
fn check_match(
    rule: Rule,
    start: usize,
    end: usize,
    target: &str,
    exemptions: &Exemptions<'_>,
) -> Option<Finding> {
    if rule == Rule::PeriodSpace && exemptions.covers(target) {
        return None;
    }

    let suggestion = rule.suggest(target)?;

    Some(Finding {
        rule,
        start,
        end,
        target: target.to_string(),
        feedback: rule.feedback().to_string(),
        see_also: rule.see_also().map(str::to_string),
        suggestions: vec![suggestion],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_of(findings: &[Finding]) -> Vec<Rule> {
        findings.iter().map(|f| f.rule).collect()
    }

    fn span(text: &str, f: &Finding) -> String {
        text.chars().skip(f.start).take(f.end - f.start).collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(RuleEngine::new().scan("").is_empty());
    }

    #[test]
    fn test_clean_prose() {
        let text = "Memory improves with sleep (Walker & Stickgold, 2004). \
                    Walker and Stickgold (2004) showed this in adults.";
        assert!(RuleEngine::new().scan(text).is_empty());
    }

    #[test]
    fn test_url_periods_are_exempt() {
        let findings = RuleEngine::new().scan("https://example.com/a.b.c");
        assert!(findings.iter().all(|f| f.rule != Rule::PeriodSpace));

        let findings = RuleEngine::new().scan("Read https://docs.example.org/guide/page.html today.");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_email_periods_are_exempt() {
        let findings = RuleEngine::new().scan("Write to:\njane.doe@uni.edu\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unexempted_period() {
        let findings = RuleEngine::new().scan("The end.Next sentence.");
        assert_eq!(rules_of(&findings), vec![Rule::PeriodSpace]);
        assert_eq!(findings[0].target, "end.Next");
        assert_eq!(findings[0].suggestions, vec!["end. Next".to_string()]);
    }

    #[test]
    fn test_rule_major_order() {
        // The join finding sits earlier in the text than the et al. finding,
        // but et al. comes first in the catalog.
        let text = "(Smith, 2020) (Jones, 2019) and later Brown, et al. noted";
        let findings = RuleEngine::new().scan(text);
        assert_eq!(rules_of(&findings), vec![Rule::EtAlComma, Rule::JoinCitations]);

        let findings = RuleEngine::new().ordering(Ordering::Position).scan(text);
        assert_eq!(rules_of(&findings), vec![Rule::JoinCitations, Rule::EtAlComma]);
    }

    #[test]
    fn test_with_rules() {
        let text = "Smith, et al. wrote (Smith, 2020) (Jones, 2019)";
        let engine = RuleEngine::with_rules(&[Rule::JoinCitations]);
        assert_eq!(engine.rules(), &[Rule::JoinCitations]);
        assert_eq!(rules_of(&engine.scan(text)), vec![Rule::JoinCitations]);
    }

    #[test]
    fn test_findings_match_text() {
        let text = "Smith2020a) ünïcødé. (Hans and Yorke, 2006) end.Then \
                    Hans & Yorke (2006). Lee, et al. found (Lee, n.d.) (Kim, 2001)";
        let findings = RuleEngine::new().scan(text);
        assert!(!findings.is_empty());
        for f in &findings {
            assert!(f.start <= f.end && f.end <= text.chars().count());
            assert_eq!(span(text, f), f.target);
            assert!(!f.suggestions.is_empty());
        }
    }

    #[test]
    fn test_malformed_input() {
        let engine = RuleEngine::new();
        for text in ["((((", "))).", "(2020", "\0\u{1}\u{fffd}.\u{7f}", ". ( 2020)", "n.d.)"] {
            for f in engine.scan(text) {
                assert_eq!(span(text, &f), f.target);
            }
        }
    }

    #[test]
    fn test_offsets_count_characters() {
        let text = "é. (Smith, 2020)";
        let findings = RuleEngine::new().scan(text);
        assert_eq!(rules_of(&findings), vec![Rule::CitationBeforePeriod]);
        assert_eq!((findings[0].start, findings[0].end), (1, 16));
        assert_eq!(findings[0].end, text.chars().count());
        assert!(findings[0].to_string().starts_with("Match from 1 to 16 for:"));
    }

    #[test]
    fn test_single_word_title_is_reported() {
        let findings = RuleEngine::new().scan("Doe, J. (2019). Psychology. Journal");
        assert_eq!(rules_of(&findings), vec![Rule::TitleCase]);
        assert_eq!(findings[0].target, "). Psychology.");
        assert_eq!(findings[0].suggestions, vec!["). Psychology.".to_string()]);
    }

    #[test]
    fn test_ordering_from_str() {
        assert_eq!("position".parse::<Ordering>(), Ok(Ordering::Position));
        assert_eq!("Rule".parse::<Ordering>(), Ok(Ordering::Rule));
        assert!("text".parse::<Ordering>().is_err());
    }
}
