//! Bookmark rows.
//!
//! Each row is laid out as
//!
//! ```text
//!  R  Rust Programming Language           rust-lang.org/learn
//! ```
//!
//! with the first-letter badge, the title column and the location column. The
//! selected row is painted with the selection colors across the whole width.

use crate::ui::helpers::{self, char_len, column_widths, position_cursor, COLUMN_GAP};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders every item starting at `row` and returns the next free row.
pub fn render_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let (title_width, _) = column_widths(cols);

    position_cursor(row, 1);

    print!("{}", Theme::fg(&theme.colors.badge_fg));
    print!("{}", Theme::bg(&theme.colors.badge_bg));
    print!("{}", Theme::bold());
    print!(" {} ", item.badge);
    print!("{}", Theme::reset());

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base} ");

    helpers::render_highlighted_text(&item.title, &item.title_ranges, theme, &base);
    print!(
        "{}",
        " ".repeat(title_width.saturating_sub(char_len(&item.title)) + COLUMN_GAP)
    );

    let location_base = if item.is_selected {
        base.clone()
    } else {
        Theme::fg(&theme.colors.location_fg)
    };
    print!("{location_base}");
    helpers::render_highlighted_text(&item.location, &item.location_ranges, theme, &location_base);

    let used = helpers::BADGE_WIDTH + title_width + COLUMN_GAP + char_len(&item.location);
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    print!("{}", Theme::reset());
    row + 1
}
