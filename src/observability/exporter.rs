//! Span exporter that appends OTLP/JSON batches to a local file.
//!
//! Plugins cannot open network sockets, so spans are exported synchronously
//! through a simple span processor into the plugin's data directory.

use super::otlp::OtlpEncoder;
use super::rotating::RotatingFile;
use futures_util::future::{self, BoxFuture};
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    encoder: OtlpEncoder,
    stopped: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.stopped {
            return Box::pin(future::ready(Err(TraceError::from("trace file exporter stopped"))));
        }

        let line = self.encoder.encode(&batch).to_string();
        let result = self
            .file
            .append_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }
}

/// Builds a tracer provider that writes every finished span to `trace_file`.
pub fn file_tracer_provider(trace_file: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(trace_file),
        encoder: OtlpEncoder::new(resource.clone()),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zmarks-otlp.json");
        let provider = file_tracer_provider(
            path.clone(),
            Resource::new(vec![KeyValue::new("service.name", "zmarks")]),
        );

        provider.tracer("test").in_span("load_bookmarks", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        let document: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(
            document["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"],
            "load_bookmarks"
        );
    }
}
