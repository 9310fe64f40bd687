//! Detail modal renderer.
//!
//! Drawn last, on top of the table, inside the box described by
//! [`ModalRect`]. Mouse hit-testing uses the same rect, so what is drawn here
//! and what reacts to clicks always agree.
//!
//! ```text
//! ╭──────────────────────────────╮
//! │ Tag Details                  │
//! │                              │
//! │ Name: rust                   │
//! │ Count: 123456                │
//! │                              │
//! │          [ Close ]           │
//! ╰──────────────────────────────╯
//! ```

use crate::ui::helpers::{pad_right, position_at};
use crate::ui::layout::ModalRect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

pub fn render_detail(detail: &DetailInfo, rect: &ModalRect, theme: &Theme) {
    let border = Theme::fg(&theme.colors.modal_border);
    let inner = rect.inner_width();
    let horizontal = "─".repeat(rect.width.saturating_sub(2));

    position_at(rect.top, rect.left);
    print!("{border}╭{horizontal}╮{}", Theme::reset());

    let body = [
        (Some(DetailInfo::TITLE.to_string()), true),
        (None, false),
        (Some(detail.name_line()), false),
        (Some(detail.count_line()), false),
        (None, false),
    ];
    for (offset, (text, bold)) in body.iter().enumerate() {
        position_at(rect.top + 1 + offset, rect.left);
        print!("{border}│ {}", Theme::reset());
        if *bold {
            print!("{}{border}", Theme::bold());
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", pad_right(text.as_deref().unwrap_or(""), inner));
        print!("{}{border} │{}", Theme::reset(), Theme::reset());
    }

    render_button(rect, theme);

    position_at(rect.top + ModalRect::HEIGHT - 1, rect.left);
    print!("{border}╰{horizontal}╯{}", Theme::reset());
}

fn render_button(rect: &ModalRect, theme: &Theme) {
    let border = Theme::fg(&theme.colors.modal_border);
    let buttons = rect.button_columns();
    let before = buttons.start.saturating_sub(rect.left + 1);
    let after = (rect.left + rect.width).saturating_sub(buttons.end + 1);

    position_at(rect.button_line(), rect.left);
    print!("{border}│{}", Theme::reset());
    print!("{}", " ".repeat(before));
    print!("{}", Theme::fg(&theme.colors.button_fg));
    print!("{}", Theme::bg(&theme.colors.button_bg));
    print!("{}", ModalRect::BUTTON_LABEL);
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(after));
    print!("{border}│{}", Theme::reset());
}
