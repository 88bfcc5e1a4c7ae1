//! Error types for the zmarks plugin.
//!
//! This module defines the centralized error type [`ZmarksError`] and a type alias
//! [`Result`] used by every fallible operation outside the picker core. The picker
//! itself (filtering, navigation, event dispatch) never fails; errors only arise at
//! the edges: reading the bookmarks file, decoding it, parsing configuration, and
//! talking to the worker thread.

use thiserror::Error;

/// The main error type for zmarks operations.
///
/// Most variants carry a description of what went wrong. I/O failures convert
/// automatically from `std::io::Error` using `#[from]`.
///
/// # Examples
///
/// ```
/// use zmarks::ZmarksError;
///
/// fn validate_opener(opener: &str) -> Result<(), ZmarksError> {
///     if opener.is_empty() {
///         return Err(ZmarksError::Config("opener must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_opener("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZmarksError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, typically while
    /// reading the bookmarks file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bookmarks file could not be decoded.
    ///
    /// Occurs when the file is not valid JSON or does not have the expected
    /// bookmark tree layout.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A bookmark carries a URL that cannot be parsed.
    ///
    /// Malformed records are fatal for a load: the picker assumes every record
    /// it receives is well formed.
    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        /// The offending URL as stored in the bookmarks file.
        url: String,
        /// Underlying parser error.
        #[source]
        source: url::ParseError,
    },

    /// A key-code table entry is malformed.
    #[error("Keymap error: {0}")]
    Keymap(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for zmarks operations.
pub type Result<T> = std::result::Result<T, ZmarksError>;
