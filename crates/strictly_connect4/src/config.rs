//! Engine configuration.
//!
//! Fixed at construction. Loaded from TOML or built in code; every path
//! goes through [`EngineConfig::validate`].

use crate::board::{CLASSIC_HEIGHT, CLASSIC_WIDTH};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Pieces in a row needed to win the classic game.
pub const CLASSIC_RUN_LENGTH: usize = 4;
/// Seconds a finished game stays on screen before restarting.
pub const CLASSIC_RESTART_DELAY_SECS: f64 = 5.0;

/// Board dimensions and timing rules for a [`TurnEngine`](crate::TurnEngine).
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of columns.
    #[serde(default = "default_width")]
    width: usize,

    /// Number of rows.
    #[serde(default = "default_height")]
    height: usize,

    /// Marks in a row needed to win.
    #[serde(default = "default_run_length")]
    run_length: usize,

    /// Engine-clock seconds between a finished game and the automatic restart.
    #[serde(default = "default_restart_delay_secs")]
    restart_delay_secs: f64,
}

#[instrument]
fn default_width() -> usize {
    CLASSIC_WIDTH
}

#[instrument]
fn default_height() -> usize {
    CLASSIC_HEIGHT
}

#[instrument]
fn default_run_length() -> usize {
    CLASSIC_RUN_LENGTH
}

#[instrument]
fn default_restart_delay_secs() -> f64 {
    CLASSIC_RESTART_DELAY_SECS
}

impl EngineConfig {
    /// Creates a validated configuration.
    #[instrument]
    pub fn new(
        width: usize,
        height: usize,
        run_length: usize,
        restart_delay_secs: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            width,
            height,
            run_length,
            restart_delay_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys fall back to the classic ruleset.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(
            width = config.width,
            height = config.height,
            run_length = config.run_length,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Checks that the configuration describes a playable game.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::new(format!(
                "Board must have at least one row and column, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::new(format!(
                "Board of {}x{} cells is too large",
                self.width, self.height
            )));
        }
        if self.run_length == 0 {
            return Err(ConfigError::new("Run length must be at least 1".to_string()));
        }
        if self.run_length > self.width.max(self.height) {
            return Err(ConfigError::new(format!(
                "Run length {} cannot fit on a {}x{} board",
                self.run_length, self.width, self.height
            )));
        }
        if !self.restart_delay_secs.is_finite() || self.restart_delay_secs < 0.0 {
            return Err(ConfigError::new(format!(
                "Restart delay must be a non-negative number of seconds, got {}",
                self.restart_delay_secs
            )));
        }
        Ok(())
    }

    /// Restart delay as a duration.
    pub fn restart_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.restart_delay_secs).unwrap_or(Duration::MAX)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: CLASSIC_WIDTH,
            height: CLASSIC_HEIGHT,
            run_length: CLASSIC_RUN_LENGTH,
            restart_delay_secs: CLASSIC_RESTART_DELAY_SECS,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic() {
        let config = EngineConfig::default();
        assert_eq!(*config.width(), 7);
        assert_eq!(*config.height(), 6);
        assert_eq!(*config.run_length(), 4);
        assert_eq!(config.restart_delay(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("run_length = 5\nwidth = 9").unwrap();
        assert_eq!(*config.width(), 9);
        assert_eq!(*config.height(), 6);
        assert_eq!(*config.run_length(), 5);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(EngineConfig::new(0, 6, 4, 5.0).is_err());
        assert!(EngineConfig::new(7, 0, 4, 5.0).is_err());
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let err = EngineConfig::new(usize::MAX, 2, 4, 5.0).unwrap_err();
        assert!(err.message.contains("too large"));
    }

    #[test]
    fn test_rejects_unwinnable_run_length() {
        assert!(EngineConfig::new(7, 6, 0, 5.0).is_err());
        let err = EngineConfig::new(3, 3, 4, 5.0).unwrap_err();
        assert!(err.message.contains("cannot fit"));
    }

    #[test]
    fn test_rejects_bad_delay() {
        assert!(EngineConfig::new(7, 6, 4, -1.0).is_err());
        assert!(EngineConfig::new(7, 6, 4, f64::NAN).is_err());
        assert!(EngineConfig::new(7, 6, 4, 0.0).is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::new(8, 7, 5, 2.5).unwrap();
        let text = config.to_toml().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }
}
