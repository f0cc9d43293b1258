//! Configuration file parsing for the API server.
//!
//! Loads the bind address and database location from a TOML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Router configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field is present but unusable
    #[error("Invalid configuration field: {0}")]
    InvalidField(String),
}

/// API server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    pub bind_port: u16,

    /// SQLite database file
    pub database_path: PathBuf,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8000,
            database_path: PathBuf::from("noticias.db"),
        }
    }
}

impl RouterConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: RouterConfig = toml::from_str(&contents)?;

        if config.bind_address.trim().is_empty() {
            return Err(ConfigError::InvalidField("bind_address".to_string()));
        }
        if config.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidField("database_path".to_string()));
        }

        Ok(config)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
