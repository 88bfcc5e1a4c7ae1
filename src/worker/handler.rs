//! Worker-side request processing.
//!
//! Reading and decoding the bookmarks file is the only blocking work the
//! plugin does, so it happens here on Zellij's worker thread. The plugin sends
//! a [`WorkerMessage`], the worker replies with one [`WorkerResponse`].

use crate::domain::error::Result;
use crate::domain::Bookmark;
use crate::source::{BookmarkSource, ChromiumBookmarks};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// The bookmark source is created on the first request and replaced whenever a
/// request names a different file.
#[derive(Serialize, Deserialize, Default)]
pub struct ZmarksWorker {
    #[serde(skip)]
    source: Option<Box<dyn BookmarkSource>>,
    #[serde(skip)]
    source_path: Option<String>,
}

impl ZmarksWorker {
    /// Creates a worker that reads from `source` regardless of the requested path.
    #[must_use]
    pub fn with_source(source: Box<dyn BookmarkSource>) -> Self {
        Self {
            source: Some(source),
            source_path: None,
        }
    }

    fn source_for(&mut self, path: &str) -> &dyn BookmarkSource {
        let stale = self.source_path.as_deref().is_some_and(|current| current != path);
        if self.source.is_none() || stale {
            tracing::debug!(path, "opening bookmark source");
            self.source = None;
            self.source_path = Some(path.to_string());
        }

        let source = self
            .source
            .get_or_insert_with(|| -> Box<dyn BookmarkSource> { Box::new(ChromiumBookmarks::new(path)) });
        &**source
    }

    /// Maps a source result to a response, logging the outcome.
    fn handle_load_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "source operation succeeded");
                on_success(value)
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "source operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_bookmarks(&mut self, path: &str) -> WorkerResponse {
        let source = self.source_for(path);
        let location = source.describe();

        Self::handle_load_result(
            "load bookmarks",
            source.load(),
            |bookmarks: Vec<Bookmark>| {
                tracing::info!(count = bookmarks.len(), source = %location, "bookmarks loaded");
                WorkerResponse::BookmarksLoaded { bookmarks }
            },
        )
    }

    /// Re-enters the plugin's trace so worker spans share its trace ID.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes one request.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadBookmarks { path, .. } => self.handle_load_bookmarks(&path),
        }
    }
}

static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// The worker runs on its own thread, so it installs its own subscriber,
/// writing to the same trace file as the plugin.
fn init_worker_tracing() {
    if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        crate::observability::init_tracing(&crate::Config::default());
    }
}

fn reply(name: String, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        }),
        Err(e) => tracing::error!(error = %e, "failed to serialize worker response"),
    }
}

impl ZellijWorker<'_> for ZmarksWorker {
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();

        let request: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!(error = %e, "failed to deserialize worker message");
                reply(
                    message,
                    &WorkerResponse::Error {
                        message: format!("malformed worker request: {e}"),
                    },
                );
                return;
            }
        };

        let response = self.handle_message(request);
        reply(message, &response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZmarksError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct FixedSource(Vec<Bookmark>);

    impl BookmarkSource for FixedSource {
        fn load(&self) -> Result<Vec<Bookmark>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    struct BrokenSource;

    impl BookmarkSource for BrokenSource {
        fn load(&self) -> Result<Vec<Bookmark>> {
            Err(ZmarksError::Parse("truncated".to_string()))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn bookmarks_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn load(path: &str) -> WorkerMessage {
        WorkerMessage::LoadBookmarks {
            path: path.to_string(),
            trace_context: None,
        }
    }

    #[test]
    fn loads_from_the_requested_file() {
        let file = bookmarks_file(
            r#"{"roots":{"bookmark_bar":{"children":[
                {"id":"1","name":"Rust","url":"https://www.rust-lang.org/"}
            ]}}}"#,
        );
        let mut worker = ZmarksWorker::default();

        match worker.handle_message(load(&file.path().to_string_lossy())) {
            WorkerResponse::BookmarksLoaded { bookmarks } => {
                assert_eq!(bookmarks.len(), 1);
                assert_eq!(bookmarks[0].url_parts.hostname, "www.rust-lang.org");
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn source_follows_the_requested_path() {
        let first = bookmarks_file(r#"{"roots":{"other":{"children":[{"name":"a","url":"https://a.example"}]}}}"#);
        let second = bookmarks_file(r#"{"roots":{"other":{"children":[]}}}"#);
        let mut worker = ZmarksWorker::default();

        worker.handle_message(load(&first.path().to_string_lossy()));
        let response = worker.handle_message(load(&second.path().to_string_lossy()));
        assert_eq!(response, WorkerResponse::BookmarksLoaded { bookmarks: vec![] });
    }

    #[test]
    fn missing_file_becomes_an_error_response() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("Bookmarks");
        let mut worker = ZmarksWorker::default();

        match worker.handle_message(load(&missing.to_string_lossy())) {
            WorkerResponse::Error { message } => assert!(message.starts_with("load bookmarks: IO error")),
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn injected_source_is_used() {
        let mut worker = ZmarksWorker::with_source(Box::new(FixedSource(vec![Bookmark::new("x", "https://x.example")])));
        let response = worker.handle_message(load("/ignored"));
        assert!(matches!(response, WorkerResponse::BookmarksLoaded { ref bookmarks } if bookmarks.len() == 1));

        let mut worker = ZmarksWorker::with_source(Box::new(BrokenSource));
        assert_eq!(
            worker.handle_message(load("/ignored")),
            WorkerResponse::Error {
                message: "load bookmarks: Parse error: truncated".to_string(),
            }
        );
    }
}
