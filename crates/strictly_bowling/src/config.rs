//! Engine configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for roster limits and storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BowlingConfig {
    /// Maximum players per game.
    #[serde(default = "default_max_players")]
    max_players: usize,

    /// Minimum player name length (after trimming).
    #[serde(default = "default_name_min_len")]
    name_min_len: usize,

    /// Maximum player name length (after trimming).
    #[serde(default = "default_name_max_len")]
    name_max_len: usize,

    /// Prefix for every key written to the backing store.
    #[serde(default = "default_key_prefix")]
    key_prefix: String,
}

#[instrument]
fn default_max_players() -> usize {
    6
}

#[instrument]
fn default_name_min_len() -> usize {
    2
}

#[instrument]
fn default_name_max_len() -> usize {
    20
}

#[instrument]
fn default_key_prefix() -> String {
    "bowling".to_string()
}

impl Default for BowlingConfig {
    fn default() -> Self {
        Self {
            max_players: default_max_players(),
            name_min_len: default_name_min_len(),
            name_max_len: default_name_max_len(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl BowlingConfig {
    /// Returns a copy with a different storage key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Returns a copy with a different player limit.
    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    /// Parses configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("cannot parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("cannot read file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            max_players = config.max_players,
            key_prefix = %config.key_prefix,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks the limits are usable.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_players == 0 {
            return Err(ConfigError::new("max_players must be at least 1"));
        }
        if self.name_min_len == 0 {
            return Err(ConfigError::new("name_min_len must be at least 1"));
        }
        if self.name_min_len > self.name_max_len {
            return Err(ConfigError::new(format!(
                "name_min_len ({}) exceeds name_max_len ({})",
                self.name_min_len, self.name_max_len
            )));
        }
        Ok(())
    }
}

/// A config file that could not be read, parsed or accepted.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid bowling config: {} ({}:{})", reason, file, line)]
pub struct ConfigError {
    /// What was wrong.
    pub reason: String,
    /// Source line that raised the error.
    pub line: u32,
    /// Source file that raised the error.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates an error located at the caller.
    #[track_caller]
    pub fn new(reason: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            reason: reason.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BowlingConfig::default();
        assert_eq!(*config.max_players(), 6);
        assert_eq!(*config.name_min_len(), 2);
        assert_eq!(*config.name_max_len(), 20);
        assert_eq!(config.key_prefix(), "bowling");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = BowlingConfig::from_toml_str("max_players = 4\n").unwrap();
        assert_eq!(*config.max_players(), 4);
        assert_eq!(*config.name_max_len(), 20);
    }

    #[test]
    fn test_rejects_inverted_name_bounds() {
        let toml = "name_min_len = 10\nname_max_len = 5\n";
        let err = BowlingConfig::from_toml_str(toml).unwrap_err();
        assert_eq!(err.reason, "name_min_len (10) exceeds name_max_len (5)");
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_rejects_zero_players() {
        assert!(BowlingConfig::from_toml_str("max_players = 0\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "key_prefix = \"league\"").unwrap();
        let config = BowlingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.key_prefix(), "league");
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(BowlingConfig::from_file("/definitely/not/here.toml").is_err());
    }
}
