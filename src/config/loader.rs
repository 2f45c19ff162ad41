use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/serialcmd/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("serialcmd").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The buffer holds at least one byte besides the reserved one
    /// - The terminator is non-empty and fits in the usable buffer
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scanner = &self.scanner;

        if scanner.buffer_capacity < 2 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "buffer_capacity must be at least 2, got {}",
                    scanner.buffer_capacity
                ),
            });
        }

        if scanner.terminator.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "terminator must not be empty".to_string(),
            });
        }

        if scanner.terminator.len() > scanner.usable_capacity() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "terminator of {} bytes does not fit in a {} byte buffer",
                    scanner.terminator.len(),
                    scanner.buffer_capacity
                ),
            });
        }

        Ok(())
    }
}
