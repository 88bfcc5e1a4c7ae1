//! Side effects requested by the application layer.
//!
//! [`handle_event`](super::handle_event) returns a `Vec<Action>` for every
//! processed event; the plugin runtime in `main.rs` executes them in order.
//! Keeping host calls out of the application layer lets the whole picker be
//! exercised in plain unit tests.

use crate::worker::WorkerMessage;

/// Commands to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Opens a URL with the configured opener command.
    ///
    /// Fire-and-forget: the outcome is not reported back to the picker.
    OpenUrl {
        /// URL of the committed bookmark.
        url: String,
    },

    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),
}
