//! Domain layer for the zmarks plugin.
//!
//! This module contains the bookmark record type and the error types shared by
//! every other layer. It is independent of Zellij APIs so it can be exercised in
//! plain unit tests.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`bookmark`]: Bookmark record, URL normalization and initial ordering

pub mod bookmark;
pub mod error;

pub use bookmark::{first_letter, normalize_url, sort_by_first_letter, Bookmark, TimeParts, UrlParts};
pub use error::{Result, ZmarksError};
