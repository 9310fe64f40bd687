//! Tracing subscriber setup.

use super::exporter::{file_tracer_provider, SCOPE};
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber: `EnvFilter` from `trace_level`, then an
/// OpenTelemetry layer exporting to `tagtable-otlp.json` in the data dir.
///
/// Tracing is best-effort. If the data directory cannot be created, or a
/// subscriber is already installed, this returns `false` and the plugin runs
/// without traces.
pub fn init_tracing(config: &Config) -> bool {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("tagtable.site", config.fetch.site.clone()),
    ]);
    let provider = file_tracer_provider(paths::trace_file(), resource);
    let layer = OpenTelemetryLayer::new(provider.tracer(SCOPE));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(level = %config.trace_level, "tracing initialized");
    }
    installed
}
