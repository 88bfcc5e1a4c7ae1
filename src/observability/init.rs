//! Subscriber installation.

use super::exporter::file_tracer_provider;
use super::{SERVICE_NAME, TRACE_FILE_NAME};
use crate::infrastructure::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `trace_level` is unset or not a valid directive.
const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber for the calling thread's process.
///
/// Spans at or above `config.trace_level` (an `EnvFilter` directive such as
/// `"debug"` or `"zmarks::source=trace"`) are exported to
/// `~/.local/share/zellij/zmarks/zmarks-otlp.json`.
///
/// Tracing is best effort: if the data directory cannot be created the
/// plugin runs without a subscriber, and calls after the first are no-ops.
///
/// ```no_run
/// use zmarks::observability::init_tracing;
/// use zmarks::Config;
///
/// init_tracing(&Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = build_filter(config.trace_level.as_deref());

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        .try_init();
}

fn build_filter(level: Option<&str>) -> EnvFilter {
    let directive = level.map(str::trim).filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}
