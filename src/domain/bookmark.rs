//! Bookmark domain model and URL normalization.
//!
//! A [`Bookmark`] is one leaf entry of the browser's bookmark tree, as delivered by
//! the data source. It is immutable once loaded; the picker wraps it in an
//! [`Item`](crate::app::Item) to add selection state.
//!
//! The URL normalization defined here is shared by matching, by the first-letter
//! badge shown in the list, and by the initial ordering of the records.

use serde::{Deserialize, Serialize};

/// Scheme prefixes removed by [`normalize_url`], longest first.
const SCHEME_PREFIXES: [&str; 2] = ["https://", "http://"];

/// Host prefix removed by [`normalize_url`] after the scheme.
const WWW_PREFIX: &str = "www.";

/// A single bookmark record.
///
/// `title` and `url` are what the picker matches against. The decomposed
/// `url_parts` and `time_parts` are filled in by the data source when the
/// bookmark tree is flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Browser-assigned identifier (stable within one bookmarks file).
    #[serde(default)]
    pub id: String,
    /// Display title; may be empty.
    pub title: String,
    /// Full URL as stored by the browser.
    pub url: String,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub date_added: i64,
    /// URL decomposed into its components.
    #[serde(default)]
    pub url_parts: UrlParts,
    /// Creation time decomposed into calendar fields.
    #[serde(default)]
    pub time_parts: TimeParts,
}

impl Bookmark {
    /// Creates a bookmark with only a title and URL.
    ///
    /// The decomposed fields are left empty; the data source fills them in for
    /// records read from disk.
    ///
    /// # Examples
    ///
    /// ```
    /// use zmarks::Bookmark;
    ///
    /// let bookmark = Bookmark::new("Rust", "https://www.rust-lang.org/");
    /// assert_eq!(bookmark.title, "Rust");
    /// assert!(bookmark.id.is_empty());
    /// ```
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            url: url.into(),
            date_added: 0,
            url_parts: UrlParts::default(),
            time_parts: TimeParts::default(),
        }
    }

    /// Returns the URL with its scheme and `www.` prefix removed.
    #[must_use]
    pub fn normalized_url(&self) -> &str {
        normalize_url(&self.url)
    }

    /// Returns the upper-cased first letter of the normalized URL.
    #[must_use]
    pub fn first_letter(&self) -> Option<char> {
        first_letter(&self.url)
    }
}

/// A URL broken down into its components.
///
/// Field contents follow the browser `URL` interface: `protocol` keeps its
/// trailing colon, `search` and `hash` keep their leading `?` / `#` and are
/// empty when absent, and `port` is empty for the scheme's default port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParts {
    pub protocol: String,
    pub host: String,
    pub hostname: String,
    pub port: String,
    pub pathname: String,
    pub search: String,
    pub hash: String,
    pub username: String,
    pub password: String,
    pub origin: String,
    /// Decoded query parameters in document order.
    pub search_params: Vec<(String, String)>,
}

/// A creation timestamp broken down into calendar fields (UTC).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    pub year: i32,
    /// Zero-based month (January = 0).
    pub month: u32,
    /// Day of the month, starting at 1.
    pub date: u32,
    /// Day of the week (Sunday = 0).
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

/// Strips a leading `http://` or `https://` and then an optional `www.`.
///
/// Prefixes are compared ASCII case-insensitively. Nothing else is touched: no
/// trimming, no lowercasing of the remainder.
///
/// # Examples
///
/// ```
/// use zmarks::domain::normalize_url;
///
/// assert_eq!(normalize_url("https://www.example.com/a"), "example.com/a");
/// assert_eq!(normalize_url("http://example.com"), "example.com");
/// assert_eq!(normalize_url("ftp://www.example.com"), "ftp://www.example.com");
/// ```
#[must_use]
pub fn normalize_url(url: &str) -> &str {
    let rest = SCHEME_PREFIXES
        .iter()
        .find_map(|prefix| strip_prefix_ignore_ascii_case(url, prefix))
        .unwrap_or(url);

    strip_prefix_ignore_ascii_case(rest, WWW_PREFIX).unwrap_or(rest)
}

/// Returns the upper-cased first character of the normalized URL.
///
/// `None` when the normalized URL is empty.
#[must_use]
pub fn first_letter(url: &str) -> Option<char> {
    normalize_url(url)
        .chars()
        .next()
        .map(|c| c.to_uppercase().next().unwrap_or(c))
}

/// Orders records by the first letter of their normalized URL, ascending.
///
/// The sort is stable: records sharing a first letter keep their document
/// order. Records with an empty normalized URL sort first.
pub fn sort_by_first_letter(records: &mut [Bookmark]) {
    records.sort_by_key(Bookmark::first_letter);
}

fn strip_prefix_ignore_ascii_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}
