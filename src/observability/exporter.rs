//! Span exporter that appends OTLP/JSON lines to a rotating file.
//!
//! The plugin runs in a WASI sandbox with no collector to talk to, so spans
//! are written next to the other plugin data and read offline.

use super::otlp;
use super::rotating_file::{RotatingFile, DEFAULT_KEEP, DEFAULT_MAX_BYTES};
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::path::PathBuf;

/// Instrumentation scope written into every batch.
pub const SCOPE: &str = "tagtable";

#[derive(Debug)]
struct OtlpFileExporter {
    sink: RotatingFile,
    resource: Resource,
    closed: bool,
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.closed {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = otlp::encode_batch(&self.resource, SCOPE, &batch).to_string();
            self.sink
                .append_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.closed = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider whose spans are exported synchronously to `path`.
#[must_use]
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        sink: RotatingFile::new(path, DEFAULT_MAX_BYTES, DEFAULT_KEEP),
        resource: resource.clone(),
        closed: false,
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
