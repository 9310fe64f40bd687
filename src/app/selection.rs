//! Selection and detail view state.
//!
//! Tracks which item, if any, is opened in the detail view. Closing hides the
//! view but keeps the last selected item around; only `visible` decides
//! whether the detail view is mounted.

use crate::domain::Item;

/// Selected item plus detail view visibility.
///
/// Invariant: `visible` implies `selected` is `Some`. Both fields are private
/// and only [`select`](Self::select) sets `visible`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<Item>,
    visible: bool,
}

impl SelectionState {
    /// Opens the detail view for `item`.
    pub fn select(&mut self, item: Item) {
        tracing::debug!(name = %item.name, count = item.count, "item selected");
        self.selected = Some(item);
        self.visible = true;
    }

    /// Hides the detail view. No-op when already hidden.
    pub fn close(&mut self) {
        if self.visible {
            tracing::debug!("detail view closed");
        }
        self.visible = false;
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last selected item, whether or not it is still shown.
    #[must_use]
    pub const fn selected_item(&self) -> Option<&Item> {
        self.selected.as_ref()
    }

    /// Item to show in the detail view, if the view is mounted.
    #[must_use]
    pub fn detail(&self) -> Option<&Item> {
        self.selected.as_ref().filter(|_| self.visible)
    }
}
