//! Exemption spans: substrings where punctuation-spacing checks must not fire.
//!
//! URLs and email addresses contain periods that are not sentence
//! boundaries. They never produce findings of their own.

use regex::Regex;

lazy_static::lazy_static! {
    /// `scheme://host.tld[/path]`
    static ref URL: Regex = Regex::new(
        r"(?:https?|ftp|file)://[\w-]+(?:\.[\w-]+)+(?:[\w.,@?^=%&:/~+#-]*[\w@?^=%&/~+#-])?"
    ).unwrap();

    /// Email address alone on its line.
    static ref EMAIL: Regex = Regex::new(
        r"(?mi)^[a-z0-9_.+-]+@[a-z0-9-]+\.[a-z0-9.-]+$"
    ).unwrap();
}

/// Exempted substrings found in one text.
#[derive(Debug, Default)]
pub struct Exemptions<'t> {
    spans: Vec<&'t str>,
}

impl<'t> Exemptions<'t> {
    /// Collect every URL and email address in `text`.
    pub fn collect(text: &'t str) -> Self {
        let spans = URL
            .find_iter(text)
            .chain(EMAIL.find_iter(text))
            .map(|m| m.as_str())
            .collect();
        Self { spans }
    }

    /// Whether `target` lies inside any exempted substring.
    pub fn covers(&self, target: &str) -> bool {
        self.spans.iter().any(|span| span.contains(target))
    }
}
