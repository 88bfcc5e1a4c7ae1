//! Search input box.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin around the box.
const SEARCH_BOX_MARGIN: usize = 2;

/// Cursor drawn after the query while the input has focus.
const CURSOR: char = '▏';

/// Renders the three-line search box and returns the next free row.
///
/// ```text
/// [margin] ┌─────────────────┐
/// [margin] │ > rust▏         │
/// [margin] └─────────────────┘
/// ```
///
/// The border uses `search_bar_border` while focused and `text_dim` otherwise.
/// Long queries keep their tail visible.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.text_dim
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let prefix = " > ";
    let cursor = if search.focused { CURSOR.to_string() } else { String::new() };
    let room = inner_width.saturating_sub(prefix.len() + char_len(&cursor));
    let query = tail(&search.query, room);
    let text_len = prefix.len() + char_len(&query) + char_len(&cursor);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{prefix}{query}{cursor}");
    print!("{}", " ".repeat(inner_width.saturating_sub(text_len)));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Keeps the last `width` characters of `text`.
fn tail(text: &str, width: usize) -> String {
    let len = char_len(text);
    if len <= width {
        return text.to_string();
    }
    let skipped: String = text.chars().skip(len - width).collect();
    truncate_front(&skipped)
}

fn truncate_front(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(_) => format!("…{}", chars.as_str()),
        None => String::new(),
    }
}
