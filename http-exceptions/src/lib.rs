//! Client-facing HTTP API exceptions
//!
//! An [`Exceptions`] factory is built once at startup from the host's
//! [`Config`] (or an explicit [`ExceptionsConfig`]) plus an optional
//! [`CounterSink`]. Handlers then call one operation per status code:
//!
//! ```
//! use http_exceptions::{Config, Exceptions};
//!
//! let exceptions = Exceptions::from_app(&Config::default(), None).unwrap();
//! let err = exceptions.not_found(None, None);
//!
//! assert_eq!(err.status_code().as_u16(), 404);
//! assert_eq!(err.message(), Some("Resource not found"));
//! ```

#![allow(clippy::must_use_candidate)]

mod factory;

pub use factory::{Exceptions, FactoryConfig};
pub use http_exceptions_config::{Config, ConfigError, ExceptionsConfig};
pub use http_exceptions_core::{ApiException, CounterSink, ErrorKind, HttpError, Payload, metric_key};
