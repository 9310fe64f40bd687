//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! All positions here are zero-based pane lines and columns, the coordinate
//! system Zellij uses for mouse events. Renderers convert to one-based ANSI
//! cursor positions at the last moment.
//!
//! ```text
//! 0  (blank)
//! 1  Header
//! 2  ──────────
//! 3  Pagination bar
//! 4  NAME ▲                               COUNT
//! 5  row 0
//! …  row n
//!    status line (only when present)
//!    ──────────
//!    Footer
//! ```

use std::ops::Range;

pub const HEADER_LINE: usize = 1;
pub const TOP_BORDER_LINE: usize = 2;
pub const PAGINATION_LINE: usize = 3;
pub const COLUMN_HEADER_LINE: usize = 4;
pub const FIRST_ROW_LINE: usize = 5;

/// Width of the NAME column including its gutter.
pub const NAME_COLUMN_WIDTH: usize = 37;

/// Width reserved for the right-aligned COUNT column.
pub const COUNT_COLUMN_WIDTH: usize = 14;

/// Bottom border plus footer.
const BOTTOM_CHROME: usize = 2;

#[must_use]
pub const fn footer_line(rows: usize) -> usize {
    rows.saturating_sub(1)
}

#[must_use]
pub const fn bottom_border_line(rows: usize) -> usize {
    rows.saturating_sub(2)
}

#[must_use]
pub const fn status_line(rows: usize) -> usize {
    rows.saturating_sub(3)
}

/// Number of table rows that fit between the column headers and the bottom chrome.
#[must_use]
pub const fn available_rows(rows: usize, has_status: bool) -> usize {
    let status = if has_status { 1 } else { 0 };
    rows.saturating_sub(FIRST_ROW_LINE + BOTTOM_CHROME + status)
}

/// Where a click landed relative to the detail modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    /// On the close button.
    CloseButton,
    /// Inside the box but not on the button.
    Content,
    /// Outside the box.
    Outside,
}

/// Bounding box of the centred detail modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalRect {
    pub top: usize,
    pub left: usize,
    pub width: usize,
}

impl ModalRect {
    /// Lines: top border, title, blank, name, count, blank, button, bottom border.
    pub const HEIGHT: usize = 8;
    pub const MIN_WIDTH: usize = 32;
    pub const BUTTON_LABEL: &'static str = "[ Close ]";
    /// Offset of the button line from `top`.
    const BUTTON_OFFSET: usize = 6;

    /// Centres a box wide enough for `content_width` characters of text.
    #[must_use]
    pub fn centered(rows: usize, cols: usize, content_width: usize) -> Self {
        let max_width = cols.saturating_sub(2).max(Self::BUTTON_LABEL.len() + 2);
        let width = (content_width + 4).max(Self::MIN_WIDTH).min(max_width);
        Self {
            top: rows.saturating_sub(Self::HEIGHT) / 2,
            left: cols.saturating_sub(width) / 2,
            width,
        }
    }

    /// Columns available for text between the borders and one space of padding.
    #[must_use]
    pub const fn inner_width(&self) -> usize {
        self.width.saturating_sub(4)
    }

    #[must_use]
    pub const fn button_line(&self) -> usize {
        self.top + Self::BUTTON_OFFSET
    }

    #[must_use]
    pub const fn button_columns(&self) -> Range<usize> {
        let start = self.left + self.width.saturating_sub(Self::BUTTON_LABEL.len()) / 2;
        start..start + Self::BUTTON_LABEL.len()
    }

    #[must_use]
    pub const fn contains(&self, line: usize, col: usize) -> bool {
        line >= self.top
            && line < self.top + Self::HEIGHT
            && col >= self.left
            && col < self.left + self.width
    }

    /// Classifies a click.
    #[must_use]
    pub fn hit(&self, line: usize, col: usize) -> ModalHit {
        if !self.contains(line, col) {
            ModalHit::Outside
        } else if line == self.button_line() && self.button_columns().contains(&col) {
            ModalHit::CloseButton
        } else {
            ModalHit::Content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_rows_accounts_for_status_line() {
        assert_eq!(available_rows(30, false), 23);
        assert_eq!(available_rows(30, true), 22);
        assert_eq!(available_rows(3, true), 0);
    }

    #[test]
    fn modal_is_centred() {
        let rect = ModalRect::centered(24, 80, 10);
        assert_eq!(rect.width, ModalRect::MIN_WIDTH);
        assert_eq!(rect.top, 8);
        assert_eq!(rect.left, 24);
    }

    #[test]
    fn modal_width_is_capped_by_pane() {
        let rect = ModalRect::centered(24, 40, 200);
        assert_eq!(rect.width, 38);
        assert_eq!(rect.left, 1);
    }

    #[test]
    fn hit_classification() {
        let rect = ModalRect::centered(24, 80, 10);
        let button = rect.button_columns();

        assert_eq!(rect.hit(rect.button_line(), button.start), ModalHit::CloseButton);
        assert_eq!(rect.hit(rect.button_line(), button.end - 1), ModalHit::CloseButton);
        assert_eq!(rect.hit(rect.button_line(), button.end), ModalHit::Content);
        assert_eq!(rect.hit(rect.top, rect.left), ModalHit::Content);
        assert_eq!(rect.hit(rect.top + 3, rect.left + 2), ModalHit::Content);
        assert_eq!(rect.hit(rect.top.saturating_sub(1), rect.left), ModalHit::Outside);
        assert_eq!(rect.hit(rect.top, rect.left + rect.width), ModalHit::Outside);
        assert_eq!(rect.hit(0, 0), ModalHit::Outside);
    }
}
