//! Logging and metrics export for services using `http-exceptions`
//!
//! Installs a `tracing` subscriber and, when an OTLP exporter is
//! configured, a global OpenTelemetry meter provider feeding [`OtelCounter`].

mod metadata;
pub mod metrics;

use std::time::Duration;

use http_exceptions_config::TelemetryConfig;
use http_exceptions_config::telemetry::{ExportProtocol, ExporterConfig};
use opentelemetry::global;
use opentelemetry_sdk::metrics::SdkMeterProvider;

pub use metrics::OtelCounter;

/// Guard that flushes and shuts down the meter provider on drop
pub struct TelemetryGuard {
    meter_provider: Option<SdkMeterProvider>,
}

impl TelemetryGuard {
    /// Whether an OTLP metrics pipeline is active
    pub const fn exports_metrics(&self) -> bool {
        self.meter_provider.is_some()
    }

    /// Force flush all pending metrics immediately
    ///
    /// # Errors
    ///
    /// Returns an error if the meter provider fails to flush
    pub fn force_flush(&self) -> anyhow::Result<()> {
        if let Some(ref provider) = self.meter_provider {
            provider
                .force_flush()
                .map_err(|e| anyhow::anyhow!("failed to flush metrics: {e}"))?;
        }
        Ok(())
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.meter_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown meter provider: {e}");
        }
    }
}

/// Initialize logging and metrics from configuration
///
/// The log filter comes from the telemetry section, falling back to
/// `default_filter`, and to `info` if neither parses. Hold the returned
/// guard for the lifetime of the application. A gRPC exporter must be
/// initialized from within a tokio runtime.
///
/// # Errors
///
/// Returns an error if the OTLP exporter cannot be built, a gRPC exporter
/// is requested outside a tokio runtime, or a global subscriber is
/// already installed
pub fn init(config: Option<&TelemetryConfig>, default_filter: &str) -> anyhow::Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    // Build the exporter first so a bad exporter leaves no global state behind
    let exporter = match config {
        Some(telemetry_config) => telemetry_config
            .exporter
            .as_ref()
            .map(|exporter_config| {
                init_metrics(telemetry_config, exporter_config).map(|provider| (provider, exporter_config))
            })
            .transpose()?,
        None => None,
    };

    let directive = config.map_or(default_filter, |c| c.log_filter.as_str());
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    let mut guard = TelemetryGuard { meter_provider: None };

    if let Some((meter_provider, exporter_config)) = exporter {
        global::set_meter_provider(meter_provider.clone());
        guard.meter_provider = Some(meter_provider);

        tracing::info!(
            endpoint = %exporter_config.endpoint,
            protocol = ?exporter_config.protocol,
            "exporting exception metrics over OTLP"
        );
    }

    Ok(guard)
}

/// Initialize OTLP metrics export
fn init_metrics(config: &TelemetryConfig, exporter_config: &ExporterConfig) -> anyhow::Result<SdkMeterProvider> {
    use opentelemetry_sdk::metrics::PeriodicReader;

    let exporter = build_metrics_exporter(exporter_config)?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(exporter_config.interval))
        .build();

    let provider = SdkMeterProvider::builder()
        .with_resource(metadata::build_resource(config))
        .with_reader(reader)
        .build();

    Ok(provider)
}

/// Build OTLP metrics exporter based on protocol
fn build_metrics_exporter(config: &ExporterConfig) -> anyhow::Result<opentelemetry_otlp::MetricExporter> {
    use opentelemetry_otlp::{MetricExporter, WithExportConfig};

    let exporter = match config.protocol {
        ExportProtocol::Grpc => {
            // Tonic connects lazily on the current tokio reactor
            tokio::runtime::Handle::try_current()
                .map_err(|_| anyhow::anyhow!("the gRPC metrics exporter must be initialized inside a tokio runtime"))?;

            MetricExporter::builder()
                .with_tonic()
                .with_endpoint(config.endpoint.as_str())
                .build()
                .map_err(|e| anyhow::anyhow!("failed to build gRPC metrics exporter: {e}"))?
        }
        ExportProtocol::HttpProto => MetricExporter::builder()
            .with_http()
            .with_endpoint(config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP metrics exporter: {e}"))?,
    };

    Ok(exporter)
}

#[cfg(test)]
mod tests {
    use http_exceptions_config::Config;

    use super::*;

    fn telemetry(toml: &str) -> TelemetryConfig {
        Config::from_toml_str(toml).unwrap().telemetry.unwrap()
    }

    // The tracing subscriber is process-global, so every `init` call lives in this one test
    #[test]
    fn init_lifecycle() {
        let grpc = telemetry("[telemetry.exporter]\nendpoint = \"http://127.0.0.1:4317\"");
        let err = init(Some(&grpc), "info").err().unwrap();
        assert!(err.to_string().contains("tokio runtime"), "{err}");

        let guard = init(None, "info").unwrap();
        assert!(!guard.exports_metrics());
        guard.force_flush().unwrap();

        let err = init(None, "info").err().unwrap();
        assert!(err.to_string().contains("failed to install tracing subscriber"), "{err}");
    }

    #[test]
    fn http_proto_exporter_builds_metrics_guard() {
        let config = telemetry(
            "[telemetry.exporter]\nendpoint = \"http://127.0.0.1:4318/v1/metrics\"\nprotocol = \"http_proto\"",
        );
        let exporter_config = config.exporter.as_ref().unwrap();

        let provider = init_metrics(&config, exporter_config).unwrap();
        let guard = TelemetryGuard {
            meter_provider: Some(provider),
        };

        assert!(guard.exports_metrics());
    }

    #[test]
    fn grpc_exporter_builds_inside_runtime() {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let config = telemetry("[telemetry.exporter]\nendpoint = \"http://127.0.0.1:4317\"\nprotocol = \"grpc\"");

        let _enter = runtime.enter();
        assert!(build_metrics_exporter(config.exporter.as_ref().unwrap()).is_ok());
    }
}
