//! apalint - APA citation style checker.
//!
//! apalint scans a block of prose for common violations of APA citation
//! style and reports each one with its location, an explanation, an
//! optional reference link and a suggested correction.
//!
//! # Architecture
//!
//! - `check`: the rule catalog and the engine that applies it to text
//! - `config`: YAML config file selecting rules and finding order
//! - `report`: Output formatting (pretty, plain, JSON)
//! - `cli`: Command-line front end
//!
//! ```
//! use apalint::{RuleEngine, Rule};
//!
//! let findings = RuleEngine::new().scan("(Hans and Yorke, 2006)");
//! assert_eq!(findings[0].rule, Rule::BracketAmpersand);
//! assert_eq!(findings[0].suggestions, vec!["(Hans & Yorke, 2006)"]);
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod report;

pub use check::{scan, Finding, Ordering, Rule, RuleEngine};
pub use config::{Config, ConfigError};
