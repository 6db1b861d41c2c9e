use std::path::Path;

use crate::{Config, ConfigError};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `${VAR}` placeholders, then deserializes and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml_str(&raw)?;

        tracing::debug!(config_path = %path.display(), "loaded configuration");

        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder cannot be expanded, TOML parsing
    /// fails, or validation fails
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the exception prefix is unusable or the
    /// telemetry exporter interval is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.exceptions.validate()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_telemetry(&self) -> Result<(), ConfigError> {
        let Some(exporter) = self.telemetry.as_ref().and_then(|t| t.exporter.as_ref()) else {
            return Ok(());
        };

        if exporter.interval == 0 {
            return Err(ConfigError::Telemetry("exporter.interval must be greater than 0".to_string()));
        }

        Ok(())
    }
}
