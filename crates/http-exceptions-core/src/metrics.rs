//! Counter sink seam and metric key formatting

use std::sync::Arc;

/// Something that can count named events
///
/// Implementations decide how keys are aggregated and shipped. A failed
/// increment never prevents the exception from being constructed.
pub trait CounterSink: Send + Sync {
    /// Increment the counter identified by `key` by one
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying metrics client rejects the update
    fn increment(&self, key: &str) -> anyhow::Result<()>;
}

impl<T: CounterSink + ?Sized> CounterSink for Arc<T> {
    fn increment(&self, key: &str) -> anyhow::Result<()> {
        (**self).increment(key)
    }
}

/// Build the metric key for a status code
///
/// `{prefix}.{code}`, or the bare code when the prefix is empty.
pub fn metric_key(prefix: &str, code: u16) -> String {
    if prefix.is_empty() {
        code.to_string()
    } else {
        format!("{prefix}.{code}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_key() {
        assert_eq!(metric_key("exceptions", 404), "exceptions.404");
        assert_eq!(metric_key("api.errors", 422), "api.errors.422");
    }

    #[test]
    fn empty_prefix_yields_bare_code() {
        assert_eq!(metric_key("", 409), "409");
    }
}
