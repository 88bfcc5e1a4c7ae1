//! Key hint bar.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Hints wider than the pane are truncated rather than wrapped.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    print_centered(row, &Theme::fg(&theme.colors.text_dim), &footer.keybindings, cols);
    row + 1
}
