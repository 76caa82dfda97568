//! Shell configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Fixed constants of the shell
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Pixels per display line
    pub line_height: u32,
    /// Lines subtracted from the height-derived line count
    pub margin_lines: usize,
    /// Ticks per second
    pub tick_hz: u32,
    /// Ticks the boot screen counts down
    pub boot_countdown: u32,
    /// Key of the session record in the persistent store
    pub storage_key: String,
}

impl ShellConfig {
    /// Parses a JSON configuration
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_height == 0 {
            return Err(ConfigError::Invalid("line_height must be positive".into()));
        }
        if self.tick_hz == 0 {
            return Err(ConfigError::Invalid("tick_hz must be positive".into()));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".into()));
        }
        Ok(())
    }

    /// Period between ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz.max(1)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            line_height: 24,
            margin_lines: 2,
            tick_hz: 60,
            boot_countdown: 20,
            storage_key: "upsicronOS_state".to_string(),
        }
    }
}
