//! Loading, error and no-match messages.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message with its dimmed subtitle below it and returns the next
/// free row. Errors use `error_fg`.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };
    print_centered(row, &Theme::fg(color), &empty.message, cols);

    let dimmed = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(row + 1, &dimmed, &empty.subtitle, cols);

    row + 2
}
