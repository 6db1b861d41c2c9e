#![allow(clippy::must_use_candidate)]

mod env;
mod error;
pub mod exceptions;
mod loader;
pub mod telemetry;

use serde::Deserialize;

pub use error::ConfigError;
pub use exceptions::ExceptionsConfig;
pub use telemetry::TelemetryConfig;

/// Host application configuration
///
/// The factory reads its settings from the `[exceptions]` section when no
/// explicit [`ExceptionsConfig`] is supplied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Exception factory settings
    #[serde(default)]
    pub exceptions: ExceptionsConfig,
    /// Logging and metrics export
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
