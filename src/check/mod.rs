//! Citation style checks over plain text.

mod engine;
mod exempt;
mod rules;
mod types;

pub use engine::{Ordering, RuleEngine};
pub use exempt::Exemptions;
pub use rules::YEAR;
pub use types::{Finding, Rule};

/// Scan `text` with the full rule catalog.
pub fn scan(text: &str) -> Vec<Finding> {
    RuleEngine::new().scan(text)
}
