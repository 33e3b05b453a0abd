//! The citation rule catalog.
//!
//! Each [`Rule`] owns one compiled pattern and one suggestion transform,
//! both looked up by tag. Patterns are compiled once per process.

use regex::Regex;

use super::Rule;

/// A citation year: four digits, or `n.d.` when the source has no date.
pub const YEAR: &str = r"(?:\d{4}|n\.d\.)";

lazy_static::lazy_static! {
    static ref YEAR_LETTER: Regex = Regex::new(r"\w*\d{4}[A-Za-z][),]").unwrap();

    static ref ET_AL_COMMA: Regex = Regex::new(r"\w+, et al\..{0,5}").unwrap();

    static ref TITLE_CASE: Regex = Regex::new(r"\)\.\s*(?:[A-Z]\S*\s?)+\.").unwrap();

    // Two word characters, a period, then anything that cannot follow a
    // sentence end directly.
    static ref PERIOD_SPACE: Regex = Regex::new(r"\w{2,}\.[^ ,\n0-9)]\w+").unwrap();

    static ref JOIN_CITATIONS: Regex = Regex::new(&format!(
        r"\([^)]+\b{YEAR}\)(?:[\s+,;]*\([^)]+\b{YEAR}\))+"
    ))
    .unwrap();

    static ref CITATION_BEFORE_PERIOD: Regex =
        Regex::new(&format!(r"\.\s+\([^)]+\b{YEAR}\)")).unwrap();

    static ref BRACKET_AMPERSAND: Regex =
        Regex::new(&format!(r"\([^)]+\sand\s[^)]+\s\b{YEAR}\)")).unwrap();

    static ref PROSE_AND: Regex = Regex::new(&format!(
        r"\b[A-Z][\w'-]*(?:,\s+[A-Z][\w'-]*)*,?\s+&\s+[A-Z][\w'-]*\s+\({YEAR}[^)]*\)"
    ))
    .unwrap();

    static ref CITATION_SEPARATOR: Regex = Regex::new(r"\)[\s+,;]*\(").unwrap();

    static ref AND_WORD: Regex = Regex::new(r"\band\b").unwrap();
}

impl Rule {
    /// The compiled detection pattern for this rule.
    pub fn pattern(&self) -> &'static Regex {
        match self {
            Rule::YearLetter => &YEAR_LETTER,
            Rule::EtAlComma => &ET_AL_COMMA,
            Rule::TitleCase => &TITLE_CASE,
            Rule::PeriodSpace => &PERIOD_SPACE,
            Rule::JoinCitations => &JOIN_CITATIONS,
            Rule::CitationBeforePeriod => &CITATION_BEFORE_PERIOD,
            Rule::BracketAmpersand => &BRACKET_AMPERSAND,
            Rule::ProseAnd => &PROSE_AND,
        }
    }

    /// Derive the corrected text for a matched span.
    ///
    /// Returns `None` when the rule has nothing useful to offer: an empty
    /// result, or for the year-letter rule one identical to the target (its
    /// pattern also matches letters that are already lowercase).
    pub fn suggest(&self, target: &str) -> Option<String> {
        let suggestion = match self {
            Rule::YearLetter => target.to_lowercase(),
            Rule::EtAlComma => target.replacen(", et al.", " et al.", 1),
            Rule::TitleCase => {
                let (head, tail) = split_at_char(target, 4);
                format!("{}{}", head, tail.to_lowercase())
            }
            Rule::PeriodSpace => target.replacen('.', ". ", 1),
            Rule::JoinCitations => CITATION_SEPARATOR.replace_all(target, "; ").into_owned(),
            Rule::CitationBeforePeriod => {
                let (head, tail) = split_at_char(target, 2);
                format!("{}{}", tail, head)
            }
            Rule::BracketAmpersand => AND_WORD.replace_all(target, "&").into_owned(),
            Rule::ProseAnd => target.replace('&', "and"),
        };

        if suggestion.is_empty() || (*self == Rule::YearLetter && suggestion == target) {
            None
        } else {
            Some(suggestion)
        }
    }
}

/// Split after the first `n` characters (or at the end if shorter).
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len());
    s.split_at(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match<'t>(rule: Rule, text: &'t str) -> Option<&'t str> {
        rule.pattern().find(text).map(|m| m.as_str())
    }

    #[test]
    fn test_year_token() {
        let year = Regex::new(&format!("^{YEAR}$")).unwrap();
        assert!(year.is_match("2020"));
        assert!(year.is_match("n.d."));
        assert!(!year.is_match("20"));
        assert!(!year.is_match("nd"));
    }

    #[test]
    fn test_year_letter() {
        assert_eq!(first_match(Rule::YearLetter, "Smith2020a)"), Some("Smith2020a)"));
        assert_eq!(
            Rule::YearLetter.suggest("Smith2020a)").as_deref(),
            Some("smith2020a)")
        );
        assert_eq!(first_match(Rule::YearLetter, "(Smith, 2020B, p. 4)"), Some("2020B,"));
        assert_eq!(Rule::YearLetter.suggest("2020B,").as_deref(), Some("2020b,"));
        // Already lowercase: nothing to suggest.
        assert_eq!(Rule::YearLetter.suggest("2020a)"), None);
    }

    #[test]
    fn test_et_al_comma() {
        let target = first_match(Rule::EtAlComma, "Smith, et al. wrote").unwrap();
        assert_eq!(target, "Smith, et al. wrot");
        assert_eq!(
            Rule::EtAlComma.suggest(target).as_deref(),
            Some("Smith et al. wrot")
        );
        // Only the comma before et al. goes.
        assert_eq!(
            Rule::EtAlComma.suggest("Smith, et al., 20").as_deref(),
            Some("Smith et al., 20")
        );
    }

    #[test]
    fn test_title_case() {
        let text = "Smith, J. (2020). The Great Big Study. Journal";
        let target = first_match(Rule::TitleCase, text).unwrap();
        assert_eq!(target, "). The Great Big Study.");
        assert_eq!(
            Rule::TitleCase.suggest(target).as_deref(),
            Some("). The great big study.")
        );
        // A single capitalised word still gets reported, unchanged.
        assert_eq!(
            Rule::TitleCase.suggest("). Psychology.").as_deref(),
            Some("). Psychology.")
        );
    }

    #[test]
    fn test_period_space() {
        let target = first_match(Rule::PeriodSpace, "It ended.Then it began").unwrap();
        assert_eq!(target, "ended.Then");
        assert_eq!(
            Rule::PeriodSpace.suggest(target).as_deref(),
            Some("ended. Then")
        );
        assert_eq!(first_match(Rule::PeriodSpace, "It ended. Then"), None);
        assert_eq!(first_match(Rule::PeriodSpace, "version 3.14 works"), None);
        assert_eq!(first_match(Rule::PeriodSpace, "e.g. this"), None);
    }

    #[test]
    fn test_join_citations() {
        let target = first_match(Rule::JoinCitations, "(Smith, 2020) (Jones, 2019)").unwrap();
        assert_eq!(target, "(Smith, 2020) (Jones, 2019)");
        assert_eq!(
            Rule::JoinCitations.suggest(target).as_deref(),
            Some("(Smith, 2020; Jones, 2019)")
        );
        assert_eq!(
            Rule::JoinCitations
                .suggest("(Smith, 2020), (Jones, n.d.);(Lee, 2001)")
                .as_deref(),
            Some("(Smith, 2020; Jones, n.d.; Lee, 2001)")
        );
        assert_eq!(first_match(Rule::JoinCitations, "(Smith, 2020; Jones, 2019)"), None);
    }

    #[test]
    fn test_citation_before_period() {
        let target = first_match(Rule::CitationBeforePeriod, "word. (Smith, 2020)").unwrap();
        assert_eq!(target, ". (Smith, 2020)");
        assert_eq!(
            Rule::CitationBeforePeriod.suggest(target).as_deref(),
            Some("(Smith, 2020). ")
        );
    }

    #[test]
    fn test_bracket_ampersand() {
        let target = first_match(Rule::BracketAmpersand, "(Hans and Yorke, 2006)").unwrap();
        assert_eq!(target, "(Hans and Yorke, 2006)");
        assert_eq!(
            Rule::BracketAmpersand.suggest(target).as_deref(),
            Some("(Hans & Yorke, 2006)")
        );
        // Words merely containing "and" are left alone.
        assert_eq!(
            Rule::BracketAmpersand
                .suggest("(Sandra and Anderson, 2006)")
                .as_deref(),
            Some("(Sandra & Anderson, 2006)")
        );
    }

    #[test]
    fn test_prose_and() {
        let text = "As Hans & Yorke (2006) argued";
        let target = first_match(Rule::ProseAnd, text).unwrap();
        assert_eq!(target, "Hans & Yorke (2006)");
        assert_eq!(
            Rule::ProseAnd.suggest(target).as_deref(),
            Some("Hans and Yorke (2006)")
        );
        assert_eq!(first_match(Rule::ProseAnd, "(Hans & Yorke, 2006)"), None);
    }

    #[test]
    fn test_split_at_char_multibyte() {
        assert_eq!(split_at_char("é. (X, 2020)", 2), ("é.", " (X, 2020)"));
        assert_eq!(split_at_char("ab", 4), ("ab", ""));
    }
}
