//! Span export to a local OTLP/JSON file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → FileSpanExporter → zmarks-otlp.json
//! ```
//!
//! The file lives in the plugin data directory, rotates at 10 MiB and keeps
//! three backups. The plugin thread and the worker thread each call
//! [`init_tracing`]; both append to the same file.

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use init::init_tracing;

/// `service.name` resource attribute and tracer name.
pub const SERVICE_NAME: &str = "zmarks";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "zmarks-otlp.json";
