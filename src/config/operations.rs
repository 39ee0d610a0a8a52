//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{MigralockError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(MigralockError::ConfigError)` - Read error, parse error, or
    ///   validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            MigralockError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, falling back to defaults when the file
    /// does not exist.
    ///
    /// A missing config file is normal (everything has a default); a present
    /// but malformed one is an error the user must fix.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            MigralockError::ConfigError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `lockfile` must be non-empty
    /// - `lock_backend` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.lockfile.as_os_str().is_empty() {
            return Err(MigralockError::ConfigError(
                "config validation failed: lockfile must be non-empty".to_string(),
            ));
        }

        if self.lock_backend.is_empty() {
            return Err(MigralockError::ConfigError(
                "config validation failed: lock_backend must be non-empty".to_string(),
            ));
        }

        Ok(())
    }
}
