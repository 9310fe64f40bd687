//! Pagination bar renderer.
//!
//! ```text
//! Rows per page: 20                 41-60 of 2500  page 3/125
//! ```

use crate::ui::helpers::{pad_right, position_at};
use crate::ui::layout::PAGINATION_LINE;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders the rows-per-page choice on the left and the range and page
/// indicator on the right.
pub fn render_pagination(pagination: &PaginationInfo, theme: &Theme, cols: usize) {
    let right = format!("{}  {} ", pagination.range, pagination.page);
    let right_len = right.chars().count();
    let left = pad_right(&format!(" {}", pagination.rows_per_page), cols.saturating_sub(right_len));

    position_at(PAGINATION_LINE, 0);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{left}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    if right_len <= cols {
        print!("{right}");
    }
    print!("{}", Theme::reset());
}
