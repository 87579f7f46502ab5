//! Service configuration
//!
//! ```toml
//! max_id_attempts = 16
//! id_seed = 42          # optional, makes account ids reproducible
//! log_level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Account service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    /// How many ids to draw before giving up on a colliding account id
    #[serde(default = "default_max_id_attempts")]
    pub max_id_attempts: u32,

    /// Seed for the account id generator; `None` seeds from the OS
    #[serde(default)]
    pub id_seed: Option<u64>,

    /// Default tracing filter for binaries embedding the service
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_id_attempts() -> u32 {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            max_id_attempts: default_max_id_attempts(),
            id_seed: None,
            log_level: default_log_level(),
        }
    }
}

impl BankConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BankConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_id_attempts == 0 {
            return Err(ConfigError::Validation(
                "max_id_attempts must be at least 1".to_string(),
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "log_level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
