//! Shared rendering utilities.
//!
//! Text measurements here work on `char` indices rather than byte offsets, so
//! titles containing non-ASCII characters are truncated and highlighted safely.

use crate::ui::theme::Theme;

/// Ellipsis appended to truncated text.
const ELLIPSIS: char = '…';

/// Width of the first-letter badge plus the space after it.
pub const BADGE_WIDTH: usize = 4;

/// Spaces between the title and location columns.
pub const COLUMN_GAP: usize = 2;

/// Widest the title column gets on very wide panes.
const MAX_TITLE_WIDTH: usize = 60;

/// Splits a row of `cols` characters into `(title, location)` column widths.
///
/// The title takes three fifths of the space after the badge, capped at a
/// readable width; the location gets the rest.
///
/// ```
/// use zmarks::ui::helpers::column_widths;
///
/// assert_eq!(column_widths(86), (48, 32));
/// assert_eq!(column_widths(3), (0, 0));
/// ```
#[must_use]
pub fn column_widths(cols: usize) -> (usize, usize) {
    let available = cols.saturating_sub(BADGE_WIDTH + COLUMN_GAP);
    let title = (available * 3 / 5).min(MAX_TITLE_WIDTH);
    (title, available - title)
}

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, ending with an ellipsis when
/// something was cut.
///
/// # Examples
///
/// ```
/// use zmarks::ui::helpers::truncate;
///
/// assert_eq!(truncate("bookmarks", 20), "bookmarks");
/// assert_eq!(truncate("bookmarks", 5), "book…");
/// assert_eq!(truncate("bookmarks", 0), "");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out: String = text.chars().take(width - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Finds every non-overlapping, case-insensitive occurrence of `needle` in
/// `haystack`.
///
/// Returns `(start, end)` character ranges with an exclusive end. An empty
/// needle yields no ranges.
///
/// # Examples
///
/// ```
/// use zmarks::ui::helpers::find_match_ranges;
///
/// assert_eq!(find_match_ranges("Rust by Example", "EX"), vec![(8, 10)]);
/// assert_eq!(find_match_ranges("abab", "ab"), vec![(0, 2), (2, 4)]);
/// ```
#[must_use]
pub fn find_match_ranges(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    let hay: Vec<char> = haystack.chars().collect();
    let pattern: Vec<char> = needle.chars().collect();

    if pattern.is_empty() || pattern.len() > hay.len() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + pattern.len() <= hay.len() {
        let window = &hay[start..start + pattern.len()];
        if window.iter().zip(&pattern).all(|(a, b)| chars_eq_ignore_case(*a, *b)) {
            ranges.push((start, start + pattern.len()));
            start += pattern.len();
        } else {
            start += 1;
        }
    }
    ranges
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Prints `text` with the given character ranges highlighted.
///
/// `restore` is the escape sequence re-applied after each highlighted section,
/// so the row's own colors (for instance the selection background) continue.
/// Ranges past the end of `text` are clipped.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        let normal: String = chars[current_pos..start].iter().collect();
        print!("{normal}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{restore}");

        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    print!("{remaining}");
}

/// Centres `text` in a line of exactly `cols` cells, truncating it first.
///
/// ```
/// use zmarks::ui::helpers::centered;
///
/// assert_eq!(centered("ab", 6), "  ab  ");
/// assert_eq!(centered("abc", 6), " abc  ");
/// assert_eq!(centered("abcdef", 4), "abc…");
/// ```
#[must_use]
pub fn centered(text: &str, cols: usize) -> String {
    let text = truncate(text, cols);
    let len = char_len(&text);
    let left = cols.saturating_sub(len) / 2;
    let right = cols.saturating_sub(left + len);
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Prints one full-width centred line at `row` in the given style.
pub fn print_centered(row: usize, style: &str, text: &str, cols: usize) {
    position_cursor(row, 1);
    print!("{style}{}{}", centered(text, cols), Theme::reset());
}
