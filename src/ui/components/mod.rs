//! Composable UI component renderers.
//!
//! - [`header`]: title bar with the match count
//! - [`search`]: search input box with focus marker
//! - [`rows`]: bookmark rows with badge, title and location
//! - [`empty`]: loading, error and no-match messages
//! - [`footer`]: key hints
//!
//! [`render_picker`] stacks them into the single layout the plugin uses:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines, once loaded]
//! [Rows or Empty State]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod rows;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use rows::render_rows;
use search::render_search_bar;

/// Rows of chrome around the bookmark rows when the search bar is shown.
pub const CHROME_ROWS: usize = 8;

/// Empty-state messages are pushed down by this many rows.
const EMPTY_STATE_OFFSET: usize = 2;

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a full frame of the picker.
pub fn render_picker(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + EMPTY_STATE_OFFSET, empty, theme, cols);
    } else {
        render_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
