//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! The host filesystem is only visible under `/host` inside the sandbox; the
//! helpers in [`paths`] translate user-facing paths to and from that mount.

pub mod paths;

pub use paths::{display_path, expand_tilde, get_data_dir, resolve_bookmarks_file, DEFAULT_BOOKMARKS_FILE};
