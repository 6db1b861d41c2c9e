use std::fmt;

use http::StatusCode;
use serde_json::{Map, Value};

use crate::{CounterSink, ErrorKind, HttpError, metric_key};

/// Caller-supplied extra fields merged into the rendered error body
pub type Payload = Map<String, Value>;

const MESSAGE_KEY: &str = "message";

/// A constructed client-facing API error
///
/// Immutable once built. Construction records one counter increment when
/// a sink is supplied and never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiException {
    kind: ErrorKind,
    message: Option<String>,
    payload: Option<Payload>,
}

impl ApiException {
    /// Build an exception and count it
    ///
    /// When `counter` is present, `increment` is called exactly once with
    /// the key produced by [`metric_key`] before this returns. Sink
    /// failures are logged and swallowed.
    pub fn new(
        kind: ErrorKind,
        message: Option<String>,
        payload: Option<Payload>,
        prefix: &str,
        counter: Option<&dyn CounterSink>,
    ) -> Self {
        let key = metric_key(prefix, kind.code());

        tracing::debug!(
            status = kind.code(),
            kind = kind.error_type(),
            metric_key = %key,
            "constructing API exception"
        );

        if let Some(counter) = counter
            && let Err(e) = counter.increment(&key)
        {
            tracing::warn!(metric_key = %key, error = %e, "failed to increment exception counter");
        }

        Self { kind, message, payload }
    }

    /// Build an exception without touching any counter
    pub fn uncounted(kind: ErrorKind, message: Option<String>, payload: Option<Payload>) -> Self {
        Self { kind, message, payload }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub const fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Flatten into a single-level mapping suitable for a JSON body
    ///
    /// Starts from a copy of the payload and then sets `"message"` when a
    /// non-empty message is present, so the message wins over any payload
    /// field with the same name.
    pub fn to_flat_mapping(&self) -> Payload {
        let mut mapping = self.payload.clone().unwrap_or_default();

        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            mapping.insert(MESSAGE_KEY.to_owned(), Value::String(message.to_owned()));
        }

        mapping
    }
}

impl fmt::Display for ApiException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message.as_deref().filter(|m| !m.is_empty()) {
            Some(message) => f.write_str(message),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ApiException {}

impl HttpError for ApiException {
    fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    fn error_type(&self) -> &str {
        self.kind.error_type()
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}
