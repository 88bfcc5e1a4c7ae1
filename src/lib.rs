//! zmarks: a Zellij plugin for filtering and opening browser bookmarks.
//!
//! The plugin reads a Chromium `Bookmarks` file, lists every bookmark, and
//! narrows the list as you type. Matching is a case-insensitive substring test
//! on the title, or on the URL with its scheme and `www.` prefix removed.
//! Arrow keys move the selection and Enter opens the selected URL with the
//! configured opener.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys → key codes
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - SearchInput ──search/shortcut──▶ Coordinator     │
//! │  - Coordinator ──filter/navigate──▶ ItemList        │
//! │  - handle_event → (render?, actions)                │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Source Layer  │   │ Worker Layer  │
//! │ (ui/)         │   │ (source/)     │   │ (worker/)     │
//! │ - ListView    │   │ - Chromium    │   │ - file I/O    │
//! │ - Theming     │   │ - URL/time    │   │ - IPC bridge  │
//! │ - Components  │   │   enrichment  │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  events/ (EventBus), domain/ (Bookmark, errors),    │
//! │  infrastructure/ (sandbox paths), observability/    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! shared_except "locked" {
//!     bind "Ctrl b" {
//!         LaunchOrFocusPlugin "file:~/.config/zellij/plugins/zmarks.wasm" {
//!             floating true
//!             bookmarks_file "~/.config/chromium/Default/Bookmarks"
//!             theme "catppuccin-latte"
//!             opener "firefox"
//!             close_on_open "true"
//!             keymap "38:previous,40:next,13:commit"
//!             trace_level "debug"
//!         }
//!     }
//! }
//! ```
//!
//! # Library usage
//!
//! ```
//! use zmarks::worker::WorkerResponse;
//! use zmarks::{handle_event, initialize, Action, Bookmark, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let bookmarks = vec![
//!     Bookmark::new("Rust", "https://www.rust-lang.org/"),
//!     Bookmark::new("Zellij", "https://zellij.dev/"),
//! ];
//! handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::BookmarksLoaded { bookmarks }))?;
//!
//! for c in "zel".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::KeyCode(13))?;
//! assert_eq!(actions[0], Action::OpenUrl { url: "https://zellij.dev/".into() });
//! # Ok::<(), zmarks::ZmarksError>(())
//! ```

pub mod app;
pub mod domain;
pub mod events;
pub mod infrastructure;
pub mod source;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Item};
pub use domain::{Bookmark, Result, ZmarksError};
pub use ui::Theme;

use app::KeyMap;
use std::collections::BTreeMap;

/// Command used to open URLs when none is configured.
pub const DEFAULT_OPENER: &str = "xdg-open";

/// Plugin configuration, read from the KDL block that loads the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Chromium `Bookmarks` file; `~` is the host home directory.
    pub bookmarks_file: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// TOML theme file.
    pub theme_file: Option<String>,

    /// `code:command` table replacing the default key map.
    pub keymap: Option<String>,

    /// Program run as `opener <url>`.
    pub opener: String,

    /// Hide the plugin after opening a URL.
    pub close_on_open: bool,

    /// `EnvFilter` directive for exported spans. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bookmarks_file: infrastructure::DEFAULT_BOOKMARKS_FILE.to_string(),
            theme_name: None,
            theme_file: None,
            keymap: None,
            opener: DEFAULT_OPENER.to_string(),
            close_on_open: true,
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads the configuration map Zellij passes to `load`.
    ///
    /// Unknown keys are ignored; blank values and unparseable booleans fall
    /// back to the defaults.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use zmarks::Config;
    ///
    /// let map = BTreeMap::from([
    ///     ("opener".to_string(), "firefox".to_string()),
    ///     ("close_on_open".to_string(), "false".to_string()),
    /// ]);
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.opener, "firefox");
    /// assert!(!config.close_on_open);
    /// assert_eq!(config.bookmarks_file, "~/.config/google-chrome/Default/Bookmarks");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let close_on_open = match get("close_on_open").map(|raw| parse_bool("close_on_open", &raw)) {
            Some(Ok(value)) => value,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "using default close_on_open");
                defaults.close_on_open
            }
            None => defaults.close_on_open,
        };

        Self {
            bookmarks_file: get("bookmarks_file").unwrap_or(defaults.bookmarks_file),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            keymap: get("keymap"),
            opener: get("opener").unwrap_or(defaults.opener),
            close_on_open,
            trace_level: get("trace_level"),
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ZmarksError::Config(format!("{key}: expected a boolean, got {raw:?}"))),
    }
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => return theme,
            Err(e) => tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default"),
        }
    } else if let Some(theme_name) = &config.theme_name {
        match Theme::from_name(theme_name) {
            Ok(theme) => return theme,
            Err(e) => tracing::warn!(theme_name = %theme_name, error = %e, "unknown theme, using default"),
        }
    }
    Theme::default()
}

fn load_keymap(config: &Config) -> KeyMap {
    let Some(table) = &config.keymap else {
        return KeyMap::default();
    };
    KeyMap::parse(table).unwrap_or_else(|e| {
        tracing::error!(keymap = %table, error = %e, "invalid keymap, using default");
        KeyMap::default()
    })
}

/// Builds the initial, still loading, application state.
///
/// Theme and key map problems are logged and replaced by the defaults.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    let mut state = AppState::new(load_theme(config), load_keymap(config));
    state.bookmarks_file.clone_from(&config.bookmarks_file);
    state.close_on_open = config.close_on_open;

    tracing::debug!(
        bookmarks_file = %state.bookmarks_file,
        theme = %state.theme.name,
        close_on_open = state.close_on_open,
        "plugin state initialized"
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::KEY_LEFT;
    use crate::app::Command;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_zellij(&map(&[("bookmarks_file", "  "), ("opener", ""), ("theme", "")]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn values_are_read() {
        let config = Config::from_zellij(&map(&[
            ("bookmarks_file", "~/.config/chromium/Default/Bookmarks"),
            ("theme", "catppuccin-latte"),
            ("keymap", "37:previous,39:next"),
            ("close_on_open", "no"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.bookmarks_file, "~/.config/chromium/Default/Bookmarks");
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.keymap.as_deref(), Some("37:previous,39:next"));
        assert!(!config.close_on_open);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.opener, DEFAULT_OPENER);
    }

    #[test]
    fn invalid_boolean_keeps_default() {
        let config = Config::from_zellij(&map(&[("close_on_open", "sometimes")]));
        assert!(config.close_on_open);
        assert!(matches!(parse_bool("k", "sometimes"), Err(ZmarksError::Config(_))));
    }

    #[test]
    fn initialize_applies_config() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            keymap: Some("37:previous".to_string()),
            close_on_open: false,
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.keymap.map_key_code(KEY_LEFT), Some(Command::Previous));
        assert_eq!(state.keymap.map_key_code(40), None);
        assert!(!state.close_on_open);
        assert_eq!(state.bookmarks_file, config.bookmarks_file);
    }

    #[test]
    fn bad_theme_and_keymap_degrade_to_defaults() {
        let config = Config {
            theme_name: Some("solarized".to_string()),
            keymap: Some("up:previous".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.theme.name, Theme::default().name);
        assert_eq!(state.keymap, KeyMap::default());
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let latte = Theme::from_name("catppuccin-latte").unwrap();
        let contents = toml::to_string(&latte).unwrap().replace("catppuccin-latte", "custom");
        file.write_all(contents.as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-mocha".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "custom");
    }
}
