//! Plugin/worker message protocol.
//!
//! Messages travel as JSON through Zellij's `PluginMessage` payloads, so both
//! directions are plain serde enums. Requests optionally carry the caller's
//! OpenTelemetry span so worker spans join the plugin's trace.

use crate::domain::Bookmark;
use serde::{Deserialize, Serialize};

/// Trace and span IDs captured on the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// 32 hex digits.
    pub trace_id: String,
    /// 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the active span's context, if it is valid.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed, which is the
    /// case in tests and when tracing is disabled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        let context = Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        };
        tracing::trace!(trace_id = %context.trace_id, "trace context captured");
        Some(context)
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` request carrying the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_bookmarks(LoadBookmarks { path: String }),
}

/// Requests from the plugin to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read and flatten the bookmarks file at `path` (already tilde-expanded).
    LoadBookmarks {
        path: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadBookmarks { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Replies from the worker to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Every bookmark leaf, in file order.
    BookmarksLoaded { bookmarks: Vec<Bookmark> },

    /// The request failed; `message` is shown in place of the list.
    Error { message: String },
}
