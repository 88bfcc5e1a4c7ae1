//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents deserialized with serde. Two are compiled in:
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//!
//! Any other palette can be loaded from a file through the `theme_file`
//! plugin option:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! badge_fg = "#1e1e2e"
//! badge_bg = "#89b4fa"
//! location_fg = "#7f849c"
//! ```

use crate::domain::{Result, ZmarksError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Names accepted by [`Theme::from_name`].
pub const BUILTIN_THEMES: [&str; 2] = ["catppuccin-mocha", "catppuccin-latte"];

/// Color scheme used for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, subtitles and the unfocused search box.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
    /// Load failures.
    pub error_fg: String,

    /// First-letter badge in front of every row.
    pub badge_fg: String,
    pub badge_bg: String,

    /// Host and path column.
    pub location_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Errors
    ///
    /// Returns [`ZmarksError::Theme`] for an unknown name.
    ///
    /// # Examples
    ///
    /// ```
    /// use zmarks::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte")?;
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_err());
    /// # Ok::<(), zmarks::ZmarksError>(())
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => {
                return Err(ZmarksError::Theme(format!(
                    "unknown theme {name:?}, expected one of {BUILTIN_THEMES:?}"
                )))
            }
        };

        Self::from_toml(toml_str)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZmarksError::Theme`] if the file cannot be read or does not
    /// describe a complete palette.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ZmarksError::Theme(format!("failed to read {}: {e}", path.display())))?;

        Self::from_toml(&contents)
    }

    /// Parses a theme from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ZmarksError::Theme`] on invalid TOML or missing colors.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ZmarksError::Theme(format!("invalid theme TOML: {e}")))
    }

    /// Converts a hex color to RGB, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape sequence for a hex color.
    ///
    /// ```
    /// use zmarks::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#cdd6f4"), "\u{1b}[38;2;205;214;244m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `catppuccin-mocha` theme.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_builtin_theme_parses() {
        for name in BUILTIN_THEMES {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#zzzzzz"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("#fff"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Theme::bg("1e1e2e"), "\u{1b}[48;2;30;30;46m");
    }

    #[test]
    fn theme_file_round_trips_through_toml() {
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        theme.colors.badge_bg = "#123456".to_string();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), theme);
    }

    #[test]
    fn incomplete_theme_is_rejected() {
        let err = Theme::from_toml("name = \"half\"\n[colors]\nheader_fg = \"#ffffff\"\n").unwrap_err();
        assert!(matches!(err, ZmarksError::Theme(_)));
        assert!(matches!(Theme::from_file("/nonexistent/theme.toml"), Err(ZmarksError::Theme(_))));
    }
}
