use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ConfigError;

/// Flat configuration key enabling or disabling messages
pub const MESSAGE_KEY: &str = "EXCEPTION_MESSAGE";
/// Flat configuration key holding the metric key prefix
pub const PREFIX_KEY: &str = "EXCEPTION_PREFIX";
/// Prefix used when none is configured
pub const DEFAULT_PREFIX: &str = "exceptions";

/// Exception factory configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExceptionsConfig {
    /// Attach messages to constructed exceptions
    #[serde(default = "default_message", alias = "EXCEPTION_MESSAGE")]
    pub message: bool,
    /// Namespace for metric keys; empty disables prefixing
    #[serde(default = "default_prefix", alias = "EXCEPTION_PREFIX")]
    pub prefix: String,
}

impl Default for ExceptionsConfig {
    fn default() -> Self {
        Self {
            message: true,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl ExceptionsConfig {
    /// Read settings from a flat, application-wide mapping
    ///
    /// Only `EXCEPTION_MESSAGE` and `EXCEPTION_PREFIX` are looked at; any
    /// other key belongs to the host and is ignored. Missing keys fall
    /// back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a recognized key holds a value of the wrong type
    pub fn from_mapping(mapping: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match mapping.get(MESSAGE_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::Bool(enabled)) => config.message = *enabled,
            Some(_) => {
                return Err(ConfigError::InvalidType {
                    key: MESSAGE_KEY,
                    expected: "boolean",
                });
            }
        }

        match mapping.get(PREFIX_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::String(prefix)) => config.prefix.clone_from(prefix),
            Some(_) => {
                return Err(ConfigError::InvalidType {
                    key: PREFIX_KEY,
                    expected: "string",
                });
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Check that the prefix can be joined with a status code
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix contains whitespace or starts or ends
    /// with a `.`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidPrefix {
            prefix: self.prefix.clone(),
            reason,
        };

        if self.prefix.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }

        if self.prefix.starts_with('.') || self.prefix.ends_with('.') {
            return Err(invalid("must not start or end with `.`"));
        }

        Ok(())
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_message() -> bool {
    true
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}
