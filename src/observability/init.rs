//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name reported as `service.name` and as the instrumentation scope.
pub(crate) const SERVICE_NAME: &str = "SanctionCheck";

/// File the spans are appended to, inside the plugin data directory.
const TRACE_FILE_NAME: &str = "sanction-check-otlp.json";

/// Installs the global subscriber.
///
/// The level string accepts anything [`EnvFilter`] understands, for example
/// `debug` or `sanction_check=trace,info`. An unparsable filter falls back to
/// `info`.
///
/// Tracing is optional: if the data directory cannot be created the plugin
/// runs without a subscriber. Only the first call per process installs
/// anything, so the plugin and its worker can both call this.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
