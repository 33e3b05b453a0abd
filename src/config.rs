//! Configuration file for apalint.
//!
//! A config file selects which rules run and how findings are ordered:
//!
//! ```yaml
//! disabled_rules:
//!   - title_case
//! order: position
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::check::{Ordering, Rule, RuleEngine};

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["apalint.yaml", ".apalint.yaml"];

/// Errors raised while loading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unknown rule {0:?} in disabled_rules")]
    UnknownRule(String),
}

/// Top-level config definition.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Rule ids to skip (e.g. "title_case")
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    /// "rule" (default) or "position"
    #[serde(default)]
    pub order: Ordering,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), disabled = ?config.disabled_rules, "loaded config");
        Ok(config)
    }

    /// Find a config file in `dir`, if one exists.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    }

    /// Check that every disabled rule id names a real rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.disabled()?;
        Ok(())
    }

    /// Add more rules to skip by id.
    pub fn disable<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.disabled_rules
            .extend(ids.into_iter().map(|s| s.as_ref().to_string()));
    }

    fn disabled(&self) -> Result<Vec<Rule>, ConfigError> {
        self.disabled_rules
            .iter()
            .map(|id| Rule::parse(id).ok_or_else(|| ConfigError::UnknownRule(id.clone())))
            .collect()
    }

    /// Rules left enabled, in catalog order.
    pub fn enabled_rules(&self) -> Result<Vec<Rule>, ConfigError> {
        let disabled = self.disabled()?;
        Ok(Rule::ALL
            .into_iter()
            .filter(|r| !disabled.contains(r))
            .collect())
    }

    /// Build the rule engine this config describes.
    pub fn engine(&self) -> Result<RuleEngine, ConfigError> {
        Ok(RuleEngine::with_rules(&self.enabled_rules()?).ordering(self.order))
    }
}
