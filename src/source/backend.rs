//! Bookmark source abstraction.
//!
//! The worker thread only knows this trait, so other browsers' bookmark stores
//! can be supported by adding an implementation.

use crate::domain::error::Result;
use crate::domain::Bookmark;

/// A one-shot provider of flattened, enriched bookmarks.
///
/// # Implementations
///
/// - [`ChromiumBookmarks`](super::ChromiumBookmarks): Chromium/Chrome `Bookmarks` file
pub trait BookmarkSource: Send {
    /// Reads every bookmark leaf, in depth-first document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or decoded, or if any
    /// bookmark carries a URL that does not parse. A single malformed record
    /// fails the whole load.
    fn load(&self) -> Result<Vec<Bookmark>>;

    /// Human-readable location of the store, for logs and error messages.
    fn describe(&self) -> String;
}
