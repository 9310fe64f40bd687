//! Collection accumulator.
//!
//! The [`Collection`] is the single in-memory sequence of fetched items. Pages are
//! appended in arrival order while the fetch runs; once the fetch signals
//! completion the collection is frozen and later appends are ignored.
//!
//! Duplicates across pages are kept. The collection is a sequence, not a set.

use super::Item;
use super::payload::PageDecode;

/// Ordered, append-only store of fetched items.
///
/// Besides the items themselves it keeps a few diagnostic counters so bad
/// upstream data can be noticed without ever blocking the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    items: Vec<Item>,
    frozen: bool,
    pages_appended: u32,
    empty_pages: u32,
    dropped_items: usize,
}

impl Collection {
    /// Creates an empty, writable collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page of items at the end, preserving arrival order.
    ///
    /// No-op once the collection is frozen.
    pub fn append(&mut self, page_items: Vec<Item>) {
        if self.frozen {
            tracing::debug!(
                rejected = page_items.len(),
                "append after freeze ignored"
            );
            return;
        }

        if page_items.is_empty() {
            self.empty_pages += 1;
        }
        self.pages_appended += 1;
        self.items.extend(page_items);
    }

    /// Appends a decoded page and folds its diagnostics into the counters.
    pub fn append_decoded(&mut self, page: PageDecode) {
        if self.frozen {
            tracing::debug!("decoded page after freeze ignored");
            return;
        }
        self.dropped_items += page.dropped;
        self.append(page.items);
    }

    /// Marks the collection read-only for the rest of its life.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages appended so far, including empty ones.
    #[must_use]
    pub const fn pages_appended(&self) -> u32 {
        self.pages_appended
    }

    /// Number of pages that contributed zero items.
    #[must_use]
    pub const fn empty_pages(&self) -> u32 {
        self.empty_pages
    }

    /// Number of records dropped at decode time for failing validation.
    #[must_use]
    pub const fn dropped_items(&self) -> usize {
        self.dropped_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_arrival_order_across_pages() {
        let mut collection = Collection::new();
        collection.append(vec![Item::new("b", 1), Item::new("a", 2)]);
        collection.append(vec![Item::new("c", 3)]);

        let names: Vec<&str> = collection.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(collection.pages_appended(), 2);
    }

    #[test]
    fn duplicates_across_pages_are_kept() {
        let mut collection = Collection::new();
        collection.append(vec![Item::new("rust", 10)]);
        collection.append(vec![Item::new("rust", 10)]);

        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn frozen_collection_ignores_appends() {
        let mut collection = Collection::new();
        collection.append(vec![Item::new("a", 1)]);
        collection.freeze();
        collection.append(vec![Item::new("b", 2)]);

        assert!(collection.is_frozen());
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.pages_appended(), 1);
    }

    #[test]
    fn empty_pages_and_dropped_items_are_counted() {
        let mut collection = Collection::new();
        collection.append_decoded(PageDecode {
            items: vec![],
            dropped: 0,
            malformed: true,
        });
        collection.append_decoded(PageDecode {
            items: vec![Item::new("a", 1)],
            dropped: 2,
            malformed: false,
        });

        assert_eq!(collection.empty_pages(), 1);
        assert_eq!(collection.dropped_items(), 2);
        assert_eq!(collection.len(), 1);
    }
}
