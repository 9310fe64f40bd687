//! Composable UI component renderers.
//!
//! Each component draws one part of the screen at the positions fixed in
//! [`crate::ui::layout`].
//!
//! # Components
//!
//! - [`header`]: Title bar with the item total
//! - [`pagination`]: Rows-per-page and range indicator
//! - [`table`]: Column headers, rows and the status line
//! - [`loading`]: Progress while the fetch runs
//! - [`empty`]: Message when nothing was fetched
//! - [`detail`]: Modal with the selected item
//! - [`footer`]: Keybinding hints

mod detail;
mod empty;
mod footer;
mod header;
mod loading;
mod pagination;
mod table;

pub use detail::render_detail;
pub use empty::render_empty_state;
pub use loading::render_loading;

use crate::ui::helpers::{clear_line, render_rule};
use crate::ui::layout::{bottom_border_line, FIRST_ROW_LINE, TOP_BORDER_LINE};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{TableView, UIViewModel};

use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use table::{render_column_headers, render_rows, render_status};

/// Renders header, top border, bottom border and footer.
///
/// Shared by every body so the frame never moves between loading and ready.
pub fn render_chrome(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    render_header(&vm.header, theme, cols);
    render_rule(TOP_BORDER_LINE, &theme.colors.border, cols);
    render_rule(bottom_border_line(rows), &theme.colors.border, cols);
    render_footer(&vm.footer, theme, rows, cols);
}

/// Renders the ready-state table body.
///
/// Lines between the last row and the bottom chrome are cleared so a shorter
/// last page leaves nothing of the previous one behind.
pub fn render_table_view(table: &TableView, theme: &Theme, rows: usize, cols: usize) {
    render_pagination(&table.pagination, theme, cols);
    render_column_headers(&table.columns, theme, cols);
    render_rows(&table.rows, theme, cols);

    let first_free = FIRST_ROW_LINE + table.rows.len();
    for line in first_free..bottom_border_line(rows) {
        clear_line(line, cols);
    }

    if let Some(status) = &table.status {
        render_status(status, theme, rows, cols);
    }
}
