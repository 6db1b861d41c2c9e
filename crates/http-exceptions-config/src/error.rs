use thiserror::Error;

/// Errors raised while reading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A recognized key holds a value of the wrong type
    #[error("configuration key `{key}` must be a {expected}")]
    InvalidType { key: &'static str, expected: &'static str },

    /// A `${VAR}` placeholder names an unset variable without a default
    #[error("environment variable not found: `{0}`")]
    MissingVariable(String),

    /// The metric key prefix cannot be used to build metric keys
    #[error("invalid exception prefix `{prefix}`: {reason}")]
    InvalidPrefix { prefix: String, reason: &'static str },

    /// Telemetry settings are inconsistent
    #[error("invalid telemetry configuration: {0}")]
    Telemetry(String),
}
