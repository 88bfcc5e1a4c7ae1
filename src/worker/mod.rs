//! Background worker that reads the bookmarks file.
//!
//! - `messages`: request/response enums and trace context propagation
//! - `handler`: [`ZmarksWorker`], the `ZellijWorker` implementation

pub mod handler;
pub mod messages;

pub use handler::ZmarksWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
