//! Application layer: the picker core and the event/action shell around it.
//!
//! ```text
//! keys ──▶ Event ──▶ handle_event ──▶ SearchInput ──search/shortcut──▶ Coordinator
//!                                                                         │
//!                          Action ◀── outbox ◀── commit     filter/select ▼
//!                                                                      ItemList ──▶ ListView
//! ```
//!
//! - [`item`]: one bookmark plus its selection flag
//! - [`list`]: filtered, selectable item sequence
//! - [`commands`]: key-code table and query passthrough
//! - [`input`]: search text input with focus state
//! - [`coordinator`]: wiring between input and list
//! - [`actions`]: side effects for the plugin runtime
//! - [`handler`]: event processing
//! - [`state`]: application state and view model computation

pub mod actions;
pub mod commands;
pub mod coordinator;
pub mod handler;
pub mod input;
pub mod item;
pub mod list;
pub mod state;

pub use actions::Action;
pub use commands::{normalize_query, Command, KeyMap};
pub use coordinator::Coordinator;
pub use handler::{handle_event, Event};
pub use input::{InputEvent, SearchInput};
pub use item::Item;
pub use list::{ItemList, ListEvent};
pub use state::{AppState, LoadState};
