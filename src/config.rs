//! TOML configuration for the placeholder pattern and missing-value policy
//!
//! ```toml
//! on_missing = "skip"
//!
//! [pattern]
//! open = "<%"
//! close = "%>"
//! ```
//!
//! A custom expression can be given instead of delimiters with
//! `regex = '...'`; it must have exactly one capture group.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::Error;
use crate::options::{OnMissing, ReplaceOptions};
use crate::pattern::VariablePattern;
use crate::template::Engine;

/// Errors that can occur when loading or parsing a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("[pattern] must set either `regex` or both `open` and `close`")]
    AmbiguousPattern,
    #[error(transparent)]
    Pattern(#[from] Error),
}

/// Engine settings loaded from a file
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// How placeholders are written
    pub pattern: VariablePattern,
    /// Policy for placeholders without a replacement
    pub on_missing: OnMissing,
}

/// TOML structure for deserializing configs
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    on_missing: OnMissing,
    pattern: Option<TomlPattern>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPattern {
    open: Option<String>,
    close: Option<String>,
    regex: Option<String>,
}

impl TomlPattern {
    fn into_pattern(self) -> Result<VariablePattern, ConfigError> {
        match (self.open, self.close, self.regex) {
            (None, None, None) => Ok(VariablePattern::Default),
            (None, None, Some(regex)) => Ok(VariablePattern::regex(regex)),
            (Some(open), Some(close), None) => Ok(VariablePattern::delimiters(open, close)),
            _ => Err(ConfigError::AmbiguousPattern),
        }
    }
}

impl Config {
    /// Load a config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a config from a TOML string
    ///
    /// The pattern is compiled once here so a bad pattern is reported at load
    /// time.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;

        let pattern = match parsed.pattern {
            Some(p) => p.into_pattern()?,
            None => VariablePattern::Default,
        };
        Engine::with_pattern(&pattern)?;

        log::debug!("config: pattern {:?}, on_missing {:?}", pattern, parsed.on_missing);

        Ok(Config {
            pattern,
            on_missing: parsed.on_missing,
        })
    }

    /// Build the engine for this config's pattern
    pub fn engine(&self) -> Result<Engine, Error> {
        Engine::with_pattern(&self.pattern)
    }

    /// The substitution options for this config
    pub fn options(&self) -> ReplaceOptions {
        ReplaceOptions::new().with_on_missing(self.on_missing)
    }
}
