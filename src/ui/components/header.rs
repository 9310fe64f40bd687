//! Header component renderer.

use crate::ui::helpers::{center, position_at};
use crate::ui::layout::HEADER_LINE;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered, bold title bar across the full width.
pub fn render_header(header: &HeaderInfo, theme: &Theme, cols: usize) {
    position_at(HEADER_LINE, 0);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", center(&header.title, cols));
    print!("{}", Theme::reset());
}
