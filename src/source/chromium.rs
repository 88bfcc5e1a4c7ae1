//! Reader for Chromium's `Bookmarks` file.
//!
//! Chromium-based browsers keep bookmarks in a JSON document in the profile
//! directory:
//!
//! ```json
//! {
//!   "checksum": "…",
//!   "roots": {
//!     "bookmark_bar": { "type": "folder", "name": "Bookmarks bar", "children": [
//!       { "type": "url", "id": "5", "name": "Rust", "url": "https://www.rust-lang.org/",
//!         "date_added": "13300000000000000" }
//!     ] },
//!     "other": { "type": "folder", "children": [] },
//!     "synced": { "type": "folder", "children": [] }
//!   },
//!   "version": 1
//! }
//! ```
//!
//! Roots are visited in the order bookmark bar, other, synced. Any node with a
//! `children` array is a folder and is only traversed; every other node is a
//! leaf and becomes one [`Bookmark`].

use super::backend::BookmarkSource;
use super::enrich::{chromium_time_to_unix_ms, time_parts, url_parts};
use crate::domain::error::{Result, ZmarksError};
use crate::domain::Bookmark;
use crate::infrastructure::display_path;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct BookmarksFile {
    roots: Roots,
}

#[derive(Debug, Default, Deserialize)]
struct Roots {
    #[serde(default)]
    bookmark_bar: Option<Node>,
    #[serde(default)]
    other: Option<Node>,
    #[serde(default)]
    synced: Option<Node>,
}

impl Roots {
    fn iter(&self) -> impl Iterator<Item = &Node> {
        [&self.bookmark_bar, &self.other, &self.synced]
            .into_iter()
            .flatten()
    }
}

/// One node of the bookmark tree.
#[derive(Debug, Deserialize)]
struct Node {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: Option<String>,
    /// Microseconds since 1601-01-01 UTC, as a decimal string.
    #[serde(default)]
    date_added: Option<String>,
    #[serde(default)]
    children: Option<Vec<Node>>,
}

/// Bookmarks read from a Chromium profile's `Bookmarks` file.
#[derive(Debug, Clone)]
pub struct ChromiumBookmarks {
    path: PathBuf,
}

impl ChromiumBookmarks {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flattens an in-memory `Bookmarks` document.
    ///
    /// # Errors
    ///
    /// Returns [`ZmarksError::Parse`] for invalid JSON or timestamps and
    /// [`ZmarksError::InvalidUrl`] for a leaf whose URL does not parse.
    pub fn parse(contents: &str) -> Result<Vec<Bookmark>> {
        let file: BookmarksFile = serde_json::from_str(contents)
            .map_err(|e| ZmarksError::Parse(format!("failed to parse bookmarks JSON: {e}")))?;

        let mut leaves = Vec::new();
        for root in file.roots.iter() {
            collect_leaves(root, &mut leaves);
        }

        tracing::debug!(leaf_count = leaves.len(), "bookmark tree flattened");

        leaves.into_iter().map(to_bookmark).collect()
    }
}

impl BookmarkSource for ChromiumBookmarks {
    fn load(&self) -> Result<Vec<Bookmark>> {
        let _span = tracing::debug_span!("chromium_load", path = %self.path.display()).entered();

        let contents = std::fs::read_to_string(&self.path)?;
        let bookmarks = Self::parse(&contents)?;

        tracing::debug!(bookmark_count = bookmarks.len(), "bookmarks loaded");
        Ok(bookmarks)
    }

    /// The path as the user configured it, with `~` instead of `/host`.
    fn describe(&self) -> String {
        display_path(&self.path.to_string_lossy())
    }
}

/// Pushes the leaves below `node` in depth-first document order.
fn collect_leaves<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    match &node.children {
        Some(children) => {
            for child in children {
                collect_leaves(child, out);
            }
        }
        None => out.push(node),
    }
}

fn to_bookmark(node: &Node) -> Result<Bookmark> {
    let url = node.url.clone().unwrap_or_default();
    let url_parts = url_parts(&url)?;

    let date_added = match node.date_added.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(chromium_time_to_unix_ms)
            .map_err(|e| ZmarksError::Parse(format!("invalid date_added {raw:?} on bookmark {}: {e}", node.id)))?,
        None => 0,
    };

    Ok(Bookmark {
        id: node.id.clone(),
        title: node.name.clone(),
        url,
        date_added,
        url_parts,
        time_parts: time_parts(date_added),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = r#"{
        "checksum": "0",
        "roots": {
            "bookmark_bar": {
                "type": "folder", "id": "1", "name": "Bookmarks bar",
                "children": [
                    { "type": "url", "id": "4", "name": "Rust", "url": "https://www.rust-lang.org/",
                      "date_added": "13300000000123456" },
                    { "type": "folder", "id": "5", "name": "Docs", "children": [
                        { "type": "url", "id": "6", "name": "serde", "url": "https://docs.rs/serde?v=1" },
                        { "type": "folder", "id": "7", "name": "Empty", "children": [] }
                    ] },
                    { "type": "url", "id": "8", "name": "Zellij", "url": "https://zellij.dev/" }
                ]
            },
            "other": {
                "type": "folder", "id": "2", "name": "Other bookmarks",
                "children": [
                    { "type": "url", "id": "9", "name": "", "url": "http://example.com" }
                ]
            },
            "synced": { "type": "folder", "id": "3", "name": "Mobile bookmarks", "children": [] }
        },
        "version": 1
    }"#;

    #[test]
    fn leaves_are_flattened_in_document_order() {
        let bookmarks = ChromiumBookmarks::parse(TREE).unwrap();
        let ids: Vec<&str> = bookmarks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["4", "6", "8", "9"]);
    }

    #[test]
    fn leaves_are_enriched() {
        let bookmarks = ChromiumBookmarks::parse(TREE).unwrap();

        let rust = &bookmarks[0];
        assert_eq!(rust.title, "Rust");
        assert_eq!(rust.date_added, 1_655_526_400_123);
        assert_eq!(rust.url_parts.hostname, "www.rust-lang.org");
        assert_eq!(rust.time_parts.year, 2022);
        assert_eq!(rust.time_parts.month, 5);
        assert_eq!(rust.time_parts.millisecond, 123);

        let serde = &bookmarks[1];
        assert_eq!(serde.url_parts.search, "?v=1");
        assert_eq!(serde.date_added, 0);
        assert_eq!(serde.time_parts.year, 1970);
    }

    #[test]
    fn missing_roots_are_skipped() {
        let only_other = r#"{ "roots": { "other": { "children": [
            { "id": "1", "name": "a", "url": "https://a.example" }
        ] } } }"#;
        assert_eq!(ChromiumBookmarks::parse(only_other).unwrap().len(), 1);
    }

    #[test]
    fn invalid_url_fails_the_load() {
        let bad = r#"{ "roots": { "bookmark_bar": { "children": [
            { "id": "1", "name": "ok", "url": "https://ok.example" },
            { "id": "2", "name": "broken", "url": "::not a url" }
        ] } } }"#;
        assert!(matches!(
            ChromiumBookmarks::parse(bad),
            Err(ZmarksError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn leaf_without_url_is_invalid() {
        let bad = r#"{ "roots": { "bookmark_bar": { "children": [ { "id": "1", "name": "?" } ] } } }"#;
        assert!(matches!(
            ChromiumBookmarks::parse(bad),
            Err(ZmarksError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn describe_hides_the_sandbox_mount() {
        let source = ChromiumBookmarks::new("/host/.config/chromium/Default/Bookmarks");
        assert_eq!(source.describe(), "~/.config/chromium/Default/Bookmarks");
    }

    #[test]
    fn malformed_documents_are_parse_errors() {
        assert!(matches!(ChromiumBookmarks::parse("[]"), Err(ZmarksError::Parse(_))));
        let bad_date = r#"{ "roots": { "other": { "children": [
            { "id": "1", "name": "a", "url": "https://a.example", "date_added": "yesterday" }
        ] } } }"#;
        assert!(matches!(ChromiumBookmarks::parse(bad_date), Err(ZmarksError::Parse(_))));
    }
}
