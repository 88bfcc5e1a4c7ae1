//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold
//! display-ready data only: truncated strings, highlight ranges and the
//! selection marker, never references back into the picker.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Rows of the visible window, top to bottom.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: Option<usize>,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Message shown instead of the rows (loading, load failure, no matches).
    pub empty_state: Option<EmptyState>,

    /// Search input, present once bookmarks are loaded.
    pub search_bar: Option<SearchBarInfo>,
}

/// One bookmark row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Upper-cased first letter of the normalized URL, `#` when there is none.
    pub badge: char,

    /// Bookmark title, or the normalized URL for untitled bookmarks.
    pub title: String,

    /// Host and path of the bookmark.
    pub location: String,

    pub is_selected: bool,

    /// Character ranges of `title` matching the query, `(start, end)` with an
    /// exclusive end.
    pub title_ranges: Vec<(usize, usize)>,

    /// Character ranges of `location` matching the query.
    pub location_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Centered message with a dimmed explanation below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Renders the message with the error color.
    pub is_error: bool,
}

/// Contents of the search input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Whether typed characters currently reach the input.
    pub focused: bool,
}
