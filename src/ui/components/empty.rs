//! Empty state component renderer.
//!
//! Shown once loading has finished without a single usable item, for example
//! when web access was denied or the first page already failed.

use crate::ui::helpers::{center, position_at};
use crate::ui::layout::FIRST_ROW_LINE;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message and its subtitle centered below the header.
pub fn render_empty_state(empty: &EmptyState, theme: &Theme, cols: usize) {
    position_at(FIRST_ROW_LINE, 0);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", center(&empty.message, cols));
    print!("{}", Theme::reset());

    position_at(FIRST_ROW_LINE + 1, 0);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&empty.subtitle, cols));
    print!("{}", Theme::reset());
}
