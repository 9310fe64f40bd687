//! Table component renderer.
//!
//! Two columns: NAME left-aligned in a fixed-width field, COUNT right-aligned
//! next to it. The sorted column is highlighted and carries the direction
//! arrow. The cursor row gets the selection background across the full width.

use crate::ui::helpers::{pad_left, pad_right, position_at};
use crate::ui::layout::{
    status_line, COLUMN_HEADER_LINE, COUNT_COLUMN_WIDTH, FIRST_ROW_LINE, NAME_COLUMN_WIDTH,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeaders, DisplayRow, StatusLine};

/// Widths of the NAME and COUNT fields for a pane `cols` wide.
fn column_widths(cols: usize) -> (usize, usize) {
    let count = COUNT_COLUMN_WIDTH.min(cols);
    let name = NAME_COLUMN_WIDTH.min(cols - count);
    (name, count)
}

/// Renders the bold column header line.
pub fn render_column_headers(columns: &ColumnHeaders, theme: &Theme, cols: usize) {
    let (name_width, count_width) = column_widths(cols);
    let label_color = |active: bool| {
        if active {
            &theme.colors.sort_indicator_fg
        } else {
            &theme.colors.header_fg
        }
    };

    position_at(COLUMN_HEADER_LINE, 0);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(label_color(columns.name_active)));
    print!("{}", pad_right(&columns.name, name_width));
    print!("{}", Theme::fg(label_color(columns.count_active)));
    print!("{}", pad_left(&columns.count, count_width));
    print!("{}", " ".repeat(cols - name_width - count_width));
    print!("{}", Theme::reset());
}

/// Renders the visible rows, one per line from [`FIRST_ROW_LINE`].
pub fn render_rows(rows: &[DisplayRow], theme: &Theme, cols: usize) {
    for (offset, row) in rows.iter().enumerate() {
        render_row(FIRST_ROW_LINE + offset, row, theme, cols);
    }
}

fn render_row(line: usize, row: &DisplayRow, theme: &Theme, cols: usize) {
    let (name_width, count_width) = column_widths(cols);

    position_at(line, 0);
    if row.is_cursor {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!("{}", pad_right(&row.name, name_width));
    print!("{}", pad_left(&row.count, count_width));
    print!("{}", " ".repeat(cols - name_width - count_width));
    print!("{}", Theme::reset());
}

/// Renders the status line just above the bottom border.
pub fn render_status(status: &StatusLine, theme: &Theme, rows: usize, cols: usize) {
    let color = if status.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.text_dim
    };

    position_at(status_line(rows), 0);
    print!("{}", Theme::fg(color));
    print!("{}", pad_right(&format!(" {}", status.text), cols));
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_shrink_on_narrow_panes() {
        assert_eq!(column_widths(120), (NAME_COLUMN_WIDTH, COUNT_COLUMN_WIDTH));
        assert_eq!(column_widths(30), (16, COUNT_COLUMN_WIDTH));
        assert_eq!(column_widths(10), (0, 10));
    }
}
