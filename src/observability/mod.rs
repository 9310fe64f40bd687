//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → OtlpFileExporter
//!                                                         → tagtable-otlp.json (+ .1 .. .3)
//! ```
//!
//! The filter comes from the `trace_level` plugin option (`EnvFilter` syntax,
//! default `info`). Spans are written to
//! `~/.local/share/zellij/tagtable/tagtable-otlp.json`, one OTLP/JSON batch per
//! line, rotated at 10 MB.

mod exporter;
mod init;
mod otlp;
mod rotating_file;

pub use init::init_tracing;
