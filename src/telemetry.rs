// ABOUTME: Tracing subscriber setup shared by the binaries: stderr logs plus an
// ABOUTME: optional OTLP/HTTP span exporter pointed at the Phoenix collector.

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::{Resource, runtime};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::ConfigError;

/// Resource attribute Phoenix files incoming spans under.
pub const PROJECT_ATTRIBUTE: &str = "openinference.project.name";

const SERVICE_NAME: &str = "hello-phoenix";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where to ship spans, and under which project.
#[derive(Debug, Clone, Copy)]
pub struct SpanExport<'a> {
    /// Full OTLP/HTTP traces URL, e.g. `http://localhost:6006/v1/traces`.
    pub endpoint: &'a str,
    pub project: &'a str,
}

/// Keeps the exporter alive. Call [`TelemetryGuard::shutdown`] before exit so
/// batched spans are flushed.
#[derive(Default)]
#[must_use]
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported.
    pub fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }

    /// Flush pending spans and stop the exporter.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "failed to flush spans");
            }
        }
    }
}

/// Resource attached to every exported span.
pub fn project_resource(project: &str) -> Resource {
    Resource::new(vec![
        KeyValue::new(PROJECT_ATTRIBUTE, project.to_string()),
        KeyValue::new("service.name", SERVICE_NAME),
    ])
}

fn span_provider(export: SpanExport<'_>) -> Result<TracerProvider, ConfigError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(export.endpoint)
        .build()
        .map_err(|e| ConfigError::Invalid {
            key: "PHOENIX_COLLECTOR_ENDPOINT",
            message: e.to_string(),
        })?;

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(project_resource(export.project))
        .build())
}

/// Install the global subscriber.
///
/// `default_directive` applies when `RUST_LOG` is unset and also bounds what is
/// exported. Span close events are logged so every action and model call shows
/// its duration. With `export`, spans also go to the collector; this needs a
/// running Tokio runtime.
pub fn init(
    default_directive: &str,
    format: LogFormat,
    export: Option<SpanExport<'_>>,
) -> Result<TelemetryGuard, ConfigError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let provider = export.map(span_provider).transpose()?;
    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(SERVICE_NAME)));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(otel_layer);

    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    };

    if let Some(export) = export {
        tracing::info!(
            project = export.project,
            collector_endpoint = export.endpoint,
            "exporting spans"
        );
    }

    Ok(TelemetryGuard { provider })
}

#[cfg(test)]
mod tests {
    use opentelemetry::{Key, Value};

    use super::*;

    #[test]
    fn test_project_resource() {
        let resource = project_resource("multi-call-greeter");
        assert_eq!(
            resource.get(Key::from_static_str(PROJECT_ATTRIBUTE)),
            Some(Value::from("multi-call-greeter"))
        );
        assert_eq!(
            resource.get(Key::from_static_str("service.name")),
            Some(Value::from(SERVICE_NAME))
        );
    }

    #[test]
    fn test_logging_only_does_not_export() {
        let guard = init("warn", LogFormat::Pretty, None).unwrap();
        assert!(!guard.is_exporting());
        guard.shutdown();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_export_builds_provider() {
        let guard = init(
            "warn",
            LogFormat::Json,
            Some(SpanExport {
                endpoint: "http://127.0.0.1:9/v1/traces",
                project: "single-call-greeter",
            }),
        )
        .unwrap();
        assert!(guard.is_exporting());
        guard.shutdown();
    }
}
