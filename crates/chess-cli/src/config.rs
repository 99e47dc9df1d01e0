//! Configuration file loading for the terminal front-end.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// The file is not valid TOML or has wrongly typed keys.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Front-end settings. Every key is optional.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Typing a lone square lists where that piece can go.
    pub hints: bool,
    /// Accept the `undo` command.
    pub allow_undo: bool,
    /// Draw pieces as Unicode chess glyphs instead of letters.
    pub unicode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "warn".to_string(),
            hints: true,
            allow_undo: true,
            unicode: false,
        }
    }
}

impl Config {
    /// Loads the configuration at `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// or [`ConfigError::Parse`] if it contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
