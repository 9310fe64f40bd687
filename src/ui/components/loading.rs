//! Loading indicator renderer.

use crate::ui::helpers::{center, position_at};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoadingInfo;

/// Renders the loading message and the current fetch phase in the middle of
/// the pane. Nothing else of the table is drawn while loading.
pub fn render_loading(loading: &LoadingInfo, theme: &Theme, rows: usize, cols: usize) {
    let line = (rows / 2).saturating_sub(1);

    position_at(line, 0);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", center(&loading.message, cols));
    print!("{}", Theme::reset());

    position_at(line + 1, 0);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&loading.progress, cols));
    print!("{}", Theme::reset());
}
