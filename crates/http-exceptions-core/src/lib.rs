#![allow(clippy::must_use_candidate)]

mod error;
mod exception;
mod kind;
mod metrics;
#[cfg(feature = "axum")]
mod response;

pub use error::HttpError;
pub use exception::{ApiException, Payload};
pub use kind::ErrorKind;
pub use metrics::{CounterSink, metric_key};
