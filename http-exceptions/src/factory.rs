use std::fmt;
use std::sync::Arc;

use http_exceptions_config::{Config, ConfigError, ExceptionsConfig};
use http_exceptions_core::{ApiException, CounterSink, ErrorKind, Payload};

/// Settings resolved once at initialization and read-only afterwards
#[derive(Clone)]
pub struct FactoryConfig {
    /// Attach messages to constructed exceptions
    pub messages_enabled: bool,
    /// Metric key namespace; empty means bare status codes
    pub key_prefix: String,
    /// Where construction counts go; `None` disables metrics
    pub counter: Option<Arc<dyn CounterSink>>,
}

impl FactoryConfig {
    fn resolve(config: &ExceptionsConfig, counter: Option<Arc<dyn CounterSink>>) -> Self {
        Self {
            messages_enabled: config.message,
            key_prefix: config.prefix.clone(),
            counter,
        }
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self::resolve(&ExceptionsConfig::default(), None)
    }
}

impl fmt::Debug for FactoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryConfig")
            .field("messages_enabled", &self.messages_enabled)
            .field("key_prefix", &self.key_prefix)
            .field("counter", &self.counter.is_some())
            .finish()
    }
}

/// Builds client-facing exceptions for one application
///
/// Every operation applies the same message precedence: messages
/// disabled beats an explicit message, which beats the kind's default.
#[derive(Debug, Clone, Default)]
pub struct Exceptions {
    /// Explicit configuration retained across `init_app` calls
    config: Option<ExceptionsConfig>,
    settings: FactoryConfig,
}

impl Exceptions {
    /// Factory with default settings and no counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory reading its settings from the host application's configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the host's `[exceptions]` prefix is invalid
    pub fn from_app(app: &Config, counter: Option<Arc<dyn CounterSink>>) -> Result<Self, ConfigError> {
        let mut exceptions = Self::new();
        exceptions.init_app(app, None, counter)?;
        Ok(exceptions)
    }

    /// Factory using an explicit configuration, independent of any host
    ///
    /// The configuration is retained, so a later [`Self::init_app`]
    /// without an explicit configuration keeps using it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured prefix is invalid
    pub fn with_config(config: ExceptionsConfig, counter: Option<Arc<dyn CounterSink>>) -> Result<Self, ConfigError> {
        config.validate()?;

        let settings = FactoryConfig::resolve(&config, counter);
        Ok(Self {
            config: Some(config),
            settings,
        })
    }

    /// (Re)initialize against a host application
    ///
    /// An explicit `config` replaces any retained one. Without either,
    /// the host's `[exceptions]` section is used and retained. The counter
    /// always comes from this call; `None` disables metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved prefix is invalid; the factory is
    /// left unchanged in that case
    pub fn init_app(
        &mut self,
        app: &Config,
        config: Option<ExceptionsConfig>,
        counter: Option<Arc<dyn CounterSink>>,
    ) -> Result<(), ConfigError> {
        let config = config
            .or_else(|| self.config.clone())
            .unwrap_or_else(|| app.exceptions.clone());
        config.validate()?;

        self.settings = FactoryConfig::resolve(&config, counter);
        self.config = Some(config);

        tracing::info!(
            messages_enabled = self.settings.messages_enabled,
            key_prefix = %self.settings.key_prefix,
            counter = self.settings.counter.is_some(),
            "initialized exception factory"
        );

        Ok(())
    }

    /// The resolved settings
    pub const fn settings(&self) -> &FactoryConfig {
        &self.settings
    }

    /// Construct an exception of any kind
    ///
    /// The named operations (`not_found`, `conflict`, ...) delegate here.
    pub fn exception(&self, kind: ErrorKind, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        let message = self.resolve_message(message, kind.default_message());

        ApiException::new(
            kind,
            message,
            payload,
            &self.settings.key_prefix,
            self.settings.counter.as_deref(),
        )
    }

    fn resolve_message(&self, explicit: Option<&str>, default: &str) -> Option<String> {
        if !self.settings.messages_enabled {
            return None;
        }

        let message = explicit.filter(|m| !m.is_empty()).unwrap_or(default);
        Some(message.to_owned())
    }

    /// 400: request parameters failed validation
    pub fn bad_request(&self, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        self.exception(ErrorKind::BadRequest, message, payload)
    }

    /// 401: authentication missing or invalid
    pub fn unauthorized(&self, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        self.exception(ErrorKind::Unauthorized, message, payload)
    }

    /// 403: caller has no access to the resource
    pub fn forbidden(&self, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        self.exception(ErrorKind::Forbidden, message, payload)
    }

    /// 404: resource could not be found
    pub fn not_found(&self, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        self.exception(ErrorKind::NotFound, message, payload)
    }

    /// 409: conflict creating or updating a resource
    pub fn conflict(&self, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        self.exception(ErrorKind::Conflict, message, payload)
    }

    /// 410: resource existed but has been removed
    pub fn gone(&self, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        self.exception(ErrorKind::Gone, message, payload)
    }

    /// 415: invalid `Accept` or `Content-Type` header
    pub fn unsupported_media(&self, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        self.exception(ErrorKind::UnsupportedMedia, message, payload)
    }

    /// 422: parameters are well-formed but unusable
    pub fn unprocessable_entity(&self, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        self.exception(ErrorKind::UnprocessableEntity, message, payload)
    }

    /// 424: a dependent action failed
    pub fn failed_dependency(&self, message: Option<&str>, payload: Option<Payload>) -> ApiException {
        self.exception(ErrorKind::FailedDependency, message, payload)
    }
}
