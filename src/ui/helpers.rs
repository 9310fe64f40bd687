//! Shared rendering utilities.
//!
//! Cursor positioning and width-aware text fitting used by every component.
//! All width calculations count `char`s, so multi-byte names never get cut in
//! the middle of a code point.

use crate::ui::theme::Theme;

/// Positions the cursor at a one-based `row` and `col`.
///
/// Uses the ANSI escape sequence `\u{1b}[{row};{col}H`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Positions the cursor at a zero-based pane `line` and `col`, the coordinate
/// system of [`crate::ui::layout`].
pub fn position_at(line: usize, col: usize) {
    position_cursor(line + 1, col + 1);
}

/// Cuts `text` to at most `max` chars, ending in "..." when shortened.
///
/// ```rust
/// use tagtable::ui::helpers::truncate;
///
/// assert_eq!(truncate("javascript", 7), "java...");
/// assert_eq!(truncate("rust", 7), "rust");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut cut: String = text.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

/// Left-aligns `text` in a field of `width` chars, truncating if needed.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width - len))
}

/// Right-aligns `text` in a field of `width` chars, truncating if needed.
#[must_use]
pub fn pad_left(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    format!("{}{text}", " ".repeat(width - len))
}

/// Centers `text` in a field of `width` chars. Extra padding goes right.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    let left = (width - len) / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(width - len - left))
}

/// Renders a full-width horizontal rule at zero-based `line`.
pub fn render_rule(line: usize, color: &str, cols: usize) {
    position_at(line, 0);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
}

/// Clears zero-based `line` to the terminal default.
pub fn clear_line(line: usize, cols: usize) {
    position_at(line, 0);
    print!("{}{}", Theme::reset(), " ".repeat(cols));
}
