//! Exception counter backed by OpenTelemetry

use http_exceptions_core::CounterSink;
use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Meter};

/// Meter name used when the counter is built from the global provider
pub const METER_NAME: &str = "http-exceptions";

/// Instrument counting constructed exceptions
pub const EXCEPTION_COUNT: &str = "http.server.exception.count";

/// Attribute holding the full metric key (`{prefix}.{status}`)
pub const ATTR_EXCEPTION_KEY: &str = "exception.key";

/// Attribute holding the numeric status code
pub const ATTR_STATUS_CODE: &str = "http.response.status_code";

/// Counter sink recording every exception on one OpenTelemetry counter
///
/// Metric keys become attributes rather than instrument names, so bare
/// numeric keys (empty prefix) remain valid.
#[derive(Clone)]
pub struct OtelCounter {
    counter: Counter<u64>,
}

impl OtelCounter {
    /// Build the counter on the given meter
    pub fn new(meter: &Meter) -> Self {
        let counter = meter
            .u64_counter(EXCEPTION_COUNT)
            .with_description("Client-facing API exceptions constructed")
            .build();

        Self { counter }
    }

    /// Build the counter on the globally registered meter provider
    pub fn global() -> Self {
        Self::new(&opentelemetry::global::meter(METER_NAME))
    }
}

impl CounterSink for OtelCounter {
    fn increment(&self, key: &str) -> anyhow::Result<()> {
        let mut attributes = vec![KeyValue::new(ATTR_EXCEPTION_KEY, key.to_owned())];

        // Keys end in the status code; the prefix itself may contain dots
        if let Some(status) = key.rsplit('.').next().and_then(|code| code.parse::<i64>().ok()) {
            attributes.push(KeyValue::new(ATTR_STATUS_CODE, status));
        }

        self.counter.add(1, &attributes);

        Ok(())
    }
}
