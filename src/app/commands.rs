//! Translation of raw key codes into navigation commands.
//!
//! Key codes follow the browser `KeyboardEvent.keyCode` numbering (Enter is 13,
//! the arrows are 37-40). The plugin shim converts Zellij keys into these codes
//! before they reach the [`KeyMap`].
//!
//! The default table binds `41` instead of the left arrow (`37`), so the left
//! arrow does nothing out of the box. Conventional arrows are one `keymap`
//! option away.

use crate::domain::{Result, ZmarksError};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Semantic navigation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the selection towards the head of the list.
    Previous,
    /// Move the selection towards the tail of the list.
    Next,
    /// Open the selected bookmark.
    Commit,
}

impl Command {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Previous => "previous",
            Self::Next => "next",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ZmarksError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous" | "prev" | "up" => Ok(Self::Previous),
            "next" | "down" => Ok(Self::Next),
            "commit" | "ok" | "open" => Ok(Self::Commit),
            other => Err(ZmarksError::Keymap(format!("unknown command {other:?}"))),
        }
    }
}

/// Key code of the Enter key.
pub const KEY_ENTER: u32 = 13;
/// Key code of the left arrow.
pub const KEY_LEFT: u32 = 37;
/// Key code of the up arrow.
pub const KEY_UP: u32 = 38;
/// Key code of the right arrow.
pub const KEY_RIGHT: u32 = 39;
/// Key code of the down arrow.
pub const KEY_DOWN: u32 = 40;

/// Default key-code table.
const DEFAULT_TABLE: [(u32, Command); 5] = [
    (KEY_UP, Command::Previous),
    (KEY_RIGHT, Command::Next),
    (KEY_DOWN, Command::Next),
    (41, Command::Previous),
    (KEY_ENTER, Command::Commit),
];

/// Lookup table from key codes to [`Command`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    table: BTreeMap<u32, Command>,
}

impl KeyMap {
    /// Builds a key map from explicit `(code, command)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, Command)>) -> Self {
        Self {
            table: pairs.into_iter().collect(),
        }
    }

    /// Parses a comma-separated `code:command` table.
    ///
    /// # Errors
    ///
    /// Returns [`ZmarksError::Keymap`] if an entry lacks a colon, the code is
    /// not an unsigned integer, the command is unknown, or the table is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use zmarks::app::{Command, KeyMap};
    ///
    /// let keymap = KeyMap::parse("37:previous, 38:previous, 39:next, 40:next, 13:commit")?;
    /// assert_eq!(keymap.map_key_code(37), Some(Command::Previous));
    /// assert_eq!(keymap.map_key_code(41), None);
    /// # Ok::<(), zmarks::ZmarksError>(())
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        let mut table = BTreeMap::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, command) = entry
                .split_once(':')
                .ok_or_else(|| ZmarksError::Keymap(format!("expected code:command, got {entry:?}")))?;
            let code = code
                .trim()
                .parse::<u32>()
                .map_err(|e| ZmarksError::Keymap(format!("invalid key code {code:?}: {e}")))?;
            table.insert(code, command.parse::<Command>()?);
        }

        if table.is_empty() {
            return Err(ZmarksError::Keymap("key map is empty".to_string()));
        }

        Ok(Self { table })
    }

    /// Maps a raw key code to a command; unknown codes map to `None`.
    #[must_use]
    pub fn map_key_code(&self, code: u32) -> Option<Command> {
        self.table.get(&code).copied()
    }

    /// Iterates the table in ascending key-code order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, Command)> + '_ {
        self.table.iter().map(|(code, command)| (*code, *command))
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_TABLE)
    }
}

/// Turns the raw text of the search input into the query passed to the list.
///
/// This is a passthrough: leading and trailing whitespace is significant for
/// matching and is kept.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.to_string()
}
