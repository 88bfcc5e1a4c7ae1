//! Bookmark data source.
//!
//! The picker receives a flat list of [`Bookmark`](crate::domain::Bookmark)s.
//! This module produces that list from the browser's bookmark tree: it walks
//! the tree depth-first, keeps only the leaves, and enriches every leaf with
//! its decomposed URL and creation time.
//!
//! - [`backend`]: the [`BookmarkSource`] trait the worker loads through
//! - [`chromium`]: reader for Chromium's `Bookmarks` JSON file
//! - [`enrich`]: URL and timestamp decomposition

pub mod backend;
pub mod chromium;
pub mod enrich;

pub use backend::BookmarkSource;
pub use chromium::ChromiumBookmarks;
pub use enrich::{chromium_time_to_unix_ms, time_parts, url_parts};
