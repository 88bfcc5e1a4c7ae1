//! Application state and view model computation.
//!
//! [`AppState`] owns the picker for the current session. Until the worker has
//! delivered the bookmarks there is no picker at all, only a [`LoadState`]
//! describing why; once they arrive, the state builds the [`ItemList`], the
//! [`SearchInput`] and the [`Coordinator`] wiring them together, and attaches
//! the [`ListView`] so list changes trigger redraws.

use super::commands::{Command, KeyMap};
use super::coordinator::Coordinator;
use super::input::SearchInput;
use super::item::Item;
use super::list::ItemList;
use crate::domain::{normalize_url, sort_by_first_letter, Bookmark};
use crate::ui::components::CHROME_ROWS;
use crate::ui::helpers::{column_widths, find_match_ranges, truncate};
use crate::ui::theme::Theme;
use crate::ui::view::ListView;
use crate::ui::viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
use std::cell::RefCell;
use std::rc::Rc;

/// Badge shown for bookmarks whose normalized URL is empty.
const NO_LETTER_BADGE: char = '#';

/// Progress of the one-shot bookmark load.
#[derive(Debug)]
pub enum LoadState {
    /// Waiting for the worker.
    Loading,
    /// The worker reported an error; the picker is never built.
    Failed(String),
    /// Bookmarks are loaded and the picker is live.
    Ready(Coordinator),
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    pub theme: Theme,

    /// Key-code table handed to the search input.
    pub keymap: KeyMap,

    /// Bookmarks file as shown to the user (`~/...`).
    pub bookmarks_file: String,

    /// Hide the plugin after opening a bookmark.
    pub close_on_open: bool,

    /// Whether `LoadBookmarks` has been posted to the worker.
    pub load_requested: bool,

    pub load_state: LoadState,

    view: ListView,
}

impl AppState {
    /// Creates a state waiting for bookmarks.
    #[must_use]
    pub fn new(theme: Theme, keymap: KeyMap) -> Self {
        Self {
            theme,
            keymap,
            bookmarks_file: String::new(),
            close_on_open: true,
            load_requested: false,
            load_state: LoadState::Loading,
            view: ListView::new(),
        }
    }

    /// Builds the picker over `bookmarks`.
    ///
    /// Records are stably ordered by the first letter of their normalized URL
    /// before the list is created. A previously loaded picker is torn down.
    pub fn install_bookmarks(&mut self, mut bookmarks: Vec<Bookmark>) {
        let _span = tracing::debug_span!("install_bookmarks", count = bookmarks.len()).entered();

        if let LoadState::Ready(previous) = &self.load_state {
            self.view.detach(&previous.list().borrow());
        }

        sort_by_first_letter(&mut bookmarks);

        let list = Rc::new(RefCell::new(ItemList::new(bookmarks)));
        self.view.attach(&list.borrow());

        let input = Rc::new(SearchInput::new(self.keymap.clone()));
        self.load_state = LoadState::Ready(Coordinator::new(input, list));

        tracing::info!("bookmark picker ready");
    }

    /// Records a load failure; the message is shown in place of the list.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(error = %message, "bookmark load failed");

        if let LoadState::Ready(previous) = &self.load_state {
            self.view.detach(&previous.list().borrow());
        }
        self.load_state = LoadState::Failed(message);
        self.view.invalidate();
    }

    /// The live picker, once bookmarks are loaded.
    #[must_use]
    pub fn coordinator(&self) -> Option<&Coordinator> {
        match &self.load_state {
            LoadState::Ready(coordinator) => Some(coordinator),
            LoadState::Loading | LoadState::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn view(&self) -> &ListView {
        &self.view
    }

    /// Returns whether anything changed since the last frame and resets the
    /// flag.
    pub fn take_dirty(&self) -> bool {
        self.view.take_dirty()
    }

    /// Computes the frame for a pane of `rows` × `cols` cells.
    ///
    /// The visible window of rows is centred on the selection where possible
    /// and shifted to stay full near the end of the list.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let footer = self.compute_footer();

        let coordinator = match &self.load_state {
            LoadState::Loading => {
                return Self::message_only(
                    Self::compute_header(None),
                    footer,
                    EmptyState {
                        message: "Loading bookmarks…".to_string(),
                        subtitle: self.bookmarks_file.clone(),
                        is_error: false,
                    },
                );
            }
            LoadState::Failed(error) => {
                return Self::message_only(
                    Self::compute_header(None),
                    footer,
                    EmptyState {
                        message: "Could not load bookmarks".to_string(),
                        subtitle: error.clone(),
                        is_error: true,
                    },
                );
            }
            LoadState::Ready(coordinator) => coordinator,
        };

        let list = coordinator.list().borrow();
        let query = coordinator.input().value();
        let header = Self::compute_header(Some((list.filtered_len(), list.len())));
        let search_bar = Some(SearchBarInfo {
            query: query.clone(),
            focused: coordinator.input().is_focused(),
        });

        let empty_state = if list.is_empty() {
            Some(EmptyState {
                message: "No bookmarks found".to_string(),
                subtitle: self.bookmarks_file.clone(),
                is_error: false,
            })
        } else if list.filtered_len() == 0 {
            Some(EmptyState {
                message: "No matches".to_string(),
                subtitle: format!("Nothing matches {query:?}"),
                is_error: false,
            })
        } else {
            None
        };

        if empty_state.is_some() {
            return UIViewModel {
                display_items: vec![],
                selected_index: None,
                header,
                footer,
                empty_state,
                search_bar,
            };
        }

        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);
        let total = list.filtered_len();
        let selected = list.selected_position();
        let anchor = selected.unwrap_or(0);

        let mut visible_start = anchor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows && total >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = list
            .filtered()
            .enumerate()
            .skip(visible_start)
            .take(visible_end - visible_start)
            .map(|(position, item)| {
                Self::compute_display_item(item, Some(position) == selected, &query, cols)
            })
            .collect();

        UIViewModel {
            display_items,
            selected_index: selected.map(|position| position - visible_start),
            header,
            footer,
            empty_state: None,
            search_bar,
        }
    }

    fn message_only(header: HeaderInfo, footer: FooterInfo, empty: EmptyState) -> UIViewModel {
        UIViewModel {
            display_items: vec![],
            selected_index: None,
            header,
            footer,
            empty_state: Some(empty),
            search_bar: None,
        }
    }

    /// Builds one row: badge, title (or normalized URL when untitled) and
    /// host+path, each truncated to its column and annotated with the ranges
    /// matching the query.
    fn compute_display_item(item: &Item, is_selected: bool, query: &str, cols: usize) -> DisplayItem {
        let (title_width, location_width) = column_widths(cols);
        let record = item.record();

        let raw_title = if record.title.is_empty() {
            record.normalized_url()
        } else {
            record.title.as_str()
        };
        let title = truncate(raw_title, title_width);
        let location = truncate(&location_of(record), location_width);

        let title_ranges = find_match_ranges(&title, query);
        let location_ranges = find_match_ranges(&location, normalize_url(query));

        DisplayItem {
            badge: record.first_letter().unwrap_or(NO_LETTER_BADGE),
            title,
            location,
            is_selected,
            title_ranges,
            location_ranges,
        }
    }

    fn compute_header(counts: Option<(usize, usize)>) -> HeaderInfo {
        let title = match counts {
            Some((shown, total)) => format!(" Bookmarks ({shown}/{total}) "),
            None => " Bookmarks ".to_string(),
        };
        HeaderInfo { title }
    }

    /// Lists the named keys bound to each command, followed by the fixed
    /// Escape hint.
    fn compute_footer(&self) -> FooterInfo {
        let keys_for = |command: Command| -> Vec<&'static str> {
            self.keymap
                .entries()
                .filter(|(_, bound)| *bound == command)
                .filter_map(|(code, _)| key_name(code))
                .collect()
        };

        let mut hints: Vec<String> = [
            (Command::Previous, "previous"),
            (Command::Next, "next"),
            (Command::Commit, "open"),
        ]
        .into_iter()
        .filter_map(|(command, label)| {
            let keys = keys_for(command);
            (!keys.is_empty()).then(|| format!("{}: {label}", keys.join("/")))
        })
        .collect();
        hints.push("Esc: clear/close".to_string());

        FooterInfo {
            keybindings: hints.join("  "),
        }
    }
}

/// Host and path of a bookmark, or its normalized URL when the URL was never
/// decomposed.
fn location_of(record: &Bookmark) -> String {
    let parts = &record.url_parts;
    if parts.host.is_empty() {
        return record.normalized_url().to_string();
    }

    let host = normalize_url(&parts.host);
    if parts.pathname == "/" {
        host.to_string()
    } else {
        format!("{host}{}", parts.pathname)
    }
}

/// Display name for a key code, for the keys the plugin can produce.
const fn key_name(code: u32) -> Option<&'static str> {
    use super::commands::{KEY_DOWN, KEY_ENTER, KEY_LEFT, KEY_RIGHT, KEY_UP};

    match code {
        KEY_ENTER => Some("Enter"),
        KEY_LEFT => Some("←"),
        KEY_UP => Some("↑"),
        KEY_RIGHT => Some("→"),
        KEY_DOWN => Some("↓"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UrlParts;

    fn bookmarks(count: usize) -> Vec<Bookmark> {
        (0..count)
            .map(|i| Bookmark::new(format!("Page {i:02}"), format!("https://p{i:02}.example")))
            .collect()
    }

    fn ready(records: Vec<Bookmark>) -> AppState {
        let mut state = AppState::new(Theme::default(), KeyMap::default());
        state.install_bookmarks(records);
        state
    }

    fn press(state: &AppState, code: u32, times: usize) {
        let input = state.coordinator().unwrap().input();
        for _ in 0..times {
            input.key_up(code);
        }
    }

    #[test]
    fn loading_state_shows_message_without_search_bar() {
        let mut state = AppState::new(Theme::default(), KeyMap::default());
        state.bookmarks_file = "~/.config/google-chrome/Default/Bookmarks".to_string();

        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.search_bar.is_none());
        assert_eq!(vm.header.title, " Bookmarks ");
        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.subtitle, state.bookmarks_file);
        assert!(!empty.is_error);
    }

    #[test]
    fn failed_load_shows_error() {
        let mut state = ready(bookmarks(2));
        state.fail_load("Invalid URL \"::\"");

        assert!(state.coordinator().is_none());
        let empty = state.compute_viewmodel(24, 80).empty_state.unwrap();
        assert!(empty.is_error);
        assert_eq!(empty.subtitle, "Invalid URL \"::\"");
    }

    #[test]
    fn install_sorts_by_first_letter() {
        let state = ready(vec![
            Bookmark::new("zeta", "https://zeta.example"),
            Bookmark::new("alpha", "http://www.alpha.example"),
            Bookmark::new("mu", "https://mu.example"),
        ]);

        let list = state.coordinator().unwrap().list().borrow();
        let titles: Vec<&str> = list.items().iter().map(|i| i.record().title.as_str()).collect();
        assert_eq!(titles, ["alpha", "mu", "zeta"]);
        assert_eq!(list.selected_record().map(|r| r.title.as_str()), Some("alpha"));
    }

    #[test]
    fn header_counts_matches() {
        let state = ready(bookmarks(5));
        state.coordinator().unwrap().input().set_value("page 0");

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " Bookmarks (5/5) ");

        state.coordinator().unwrap().input().set_value("p03");
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " Bookmarks (1/5) ");
        assert_eq!(vm.display_items.len(), 1);
        assert_eq!(vm.display_items[0].location_ranges, vec![(0, 3)]);
    }

    #[test]
    fn window_follows_selection() {
        let state = ready(bookmarks(30));
        let rows = CHROME_ROWS + 10;

        let vm = state.compute_viewmodel(rows, 80);
        assert_eq!(vm.display_items.len(), 10);
        assert_eq!(vm.selected_index, Some(0));
        assert_eq!(vm.display_items[0].title, "Page 00");

        press(&state, 40, 12);
        let vm = state.compute_viewmodel(rows, 80);
        assert_eq!(vm.display_items[0].title, "Page 07");
        assert_eq!(vm.selected_index, Some(5));
        assert!(vm.display_items[5].is_selected);

        press(&state, 40, 40);
        let vm = state.compute_viewmodel(rows, 80);
        assert_eq!(vm.display_items.len(), 10);
        assert_eq!(vm.display_items[0].title, "Page 20");
        assert_eq!(vm.selected_index, Some(9));
    }

    #[test]
    fn no_matches_and_no_bookmarks_are_distinguished() {
        let state = ready(bookmarks(3));
        state.coordinator().unwrap().input().set_value("zzz");
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No matches");
        assert_eq!(vm.search_bar.unwrap().query, "zzz");
        assert_eq!(vm.selected_index, None);

        let empty = ready(vec![]);
        let vm = empty.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No bookmarks found");
    }

    #[test]
    fn rows_use_badge_and_location() {
        let mut record = Bookmark::new("", "https://www.docs.rs/serde/latest");
        record.url_parts = UrlParts {
            host: "www.docs.rs".to_string(),
            pathname: "/serde/latest".to_string(),
            ..UrlParts::default()
        };
        let state = ready(vec![record, Bookmark::new("Root", "https://root.example/")]);

        let vm = state.compute_viewmodel(24, 120);
        let docs = &vm.display_items[0];
        assert_eq!(docs.badge, 'D');
        assert_eq!(docs.title, "docs.rs/serde/latest");
        assert_eq!(docs.location, "docs.rs/serde/latest");
        assert_eq!(vm.display_items[1].location, "root.example/");
    }

    #[test]
    fn footer_reflects_keymap() {
        let state = AppState::new(Theme::default(), KeyMap::default());
        assert_eq!(
            state.compute_viewmodel(24, 80).footer.keybindings,
            "↑: previous  →/↓: next  Enter: open  Esc: clear/close"
        );

        let custom = AppState::new(
            Theme::default(),
            KeyMap::parse("37:previous,38:previous,40:next").unwrap(),
        );
        assert_eq!(
            custom.compute_viewmodel(24, 80).footer.keybindings,
            "←/↑: previous  ↓: next  Esc: clear/close"
        );
    }

    #[test]
    fn focus_is_reported_in_search_bar() {
        let state = ready(bookmarks(1));
        assert!(state.compute_viewmodel(24, 80).search_bar.unwrap().focused);
        state.coordinator().unwrap().input().blur();
        assert!(!state.compute_viewmodel(24, 80).search_bar.unwrap().focused);
    }
}
