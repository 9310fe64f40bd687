//! Footer component renderer.
//!
//! Shows the keybinding hints for whatever currently has input: the loading
//! screen, the table, or the detail modal.

use crate::ui::helpers::{center, position_at};
use crate::ui::layout::footer_line;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the dimmed, centered help line on the last pane line.
pub fn render_footer(footer: &FooterInfo, theme: &Theme, rows: usize, cols: usize) {
    position_at(footer_line(rows), 0);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&footer.keybindings, cols));
    print!("{}", Theme::reset());
}
