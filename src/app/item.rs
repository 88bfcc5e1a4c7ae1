//! A single candidate in the picker.

use crate::domain::{normalize_url, Bookmark};

/// Wraps one [`Bookmark`] and adds the selection flag.
///
/// Items are created once when the bookmark list is loaded and live for the
/// whole session; the selection flag is their only mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    record: Bookmark,
    selected: bool,
}

impl Item {
    #[must_use]
    pub const fn new(record: Bookmark) -> Self {
        Self {
            record,
            selected: false,
        }
    }

    /// Tests the item against a query.
    ///
    /// An empty query matches everything. Otherwise the comparison is a
    /// case-insensitive substring test against the title, or against the
    /// normalized URL (scheme and `www.` removed from both the URL and the
    /// query). The query is not trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use zmarks::{Bookmark, Item};
    ///
    /// let item = Item::new(Bookmark::new("Beta", "http://www.b.com/x"));
    /// assert!(item.matches(""));
    /// assert!(item.matches("BET"));
    /// assert!(item.matches("WWW.B.COM"));
    /// assert!(!item.matches(" beta"));
    /// ```
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }

        let query = query.to_lowercase();
        if self.record.title.to_lowercase().contains(&query) {
            return true;
        }

        normalize_url(&self.record.url)
            .to_lowercase()
            .contains(normalize_url(&query))
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn unselect(&mut self) {
        self.selected = false;
    }

    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub const fn record(&self) -> &Bookmark {
        &self.record
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.record.url
    }
}
