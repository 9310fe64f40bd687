//! Sort and paginate engine.
//!
//! [`derive_view`] turns the accumulated collection plus the current
//! [`SortState`] and [`PageState`] into the slice of rows shown on screen. It is
//! recomputed from scratch on every change; at a few thousand items a full
//! stable sort is cheap enough to run inside one render.
//!
//! # Ordering
//!
//! - `Name`: Unicode collation with the root locale, so punctuation sorts
//!   before symbols, accented letters sit with their base letter and lowercase
//!   precedes uppercase.
//! - `Count`: numeric.
//!
//! Descending reverses the comparator rather than the output, so items with
//! equal keys keep their arrival order in both directions.
//!
//! # Example
//!
//! ```rust
//! use tagtable::app::modes::{SortDirection, SortKey};
//! use tagtable::app::table::{derive_view, PageState, SortState};
//! use tagtable::domain::Item;
//!
//! let items = vec![Item::new("a", 5), Item::new("b", 3), Item::new("c", 5)];
//! let sort = SortState { key: SortKey::Count, direction: SortDirection::Descending };
//! let page = PageState::new(2);
//!
//! let names: Vec<&str> = derive_view(&items, &sort, &page).iter().map(|i| i.name.as_str()).collect();
//! assert_eq!(names, ["a", "c"]);
//! ```

use super::modes::{SortDirection, SortKey};
use crate::domain::Item;
use std::cmp::Ordering;
use std::ops::Range;
use icu_collator::{Collator, CollatorOptions};

/// Rows-per-page choices offered by the pagination bar.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 5] = [10, 20, 30, 50, 100];

/// Rows per page until the user picks another option.
pub const DEFAULT_ROWS_PER_PAGE: usize = 20;

/// Current sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    /// Applies a sort request for `key`.
    ///
    /// The same key flips the direction; a different key switches to it in
    /// ascending order.
    pub fn set_sort(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Compares two items under this sort state.
    #[must_use]
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::Count => a.count.cmp(&b.count),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Page index and page size. `size` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    index: usize,
    size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS_PER_PAGE)
    }
}

impl PageState {
    /// First page with `size` rows per page (a zero size is raised to 1).
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            index: 0,
            size: size.max(1),
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Jumps to page `index`. Bounds are the caller's concern.
    pub fn set_page_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.size = size.max(1);
        self.index = 0;
    }

    /// Index range of this page within a sequence of `total` items, clamped to
    /// `0..total`.
    #[must_use]
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.index.saturating_mul(self.size).min(total);
        let end = start.saturating_add(self.size).min(total);
        start..end
    }
}

/// Number of pages needed for `total` items. Zero items need zero pages.
#[must_use]
pub const fn page_count(total: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// Returns the whole collection in display order.
#[must_use]
pub fn sorted<'a>(items: &'a [Item], sort: &SortState) -> Vec<&'a Item> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    // `sort_by` is stable: equal keys keep arrival order.
    ordered.sort_by(|a, b| sort.compare(a, b));
    ordered
}

/// Returns the visible slice for the current sort and page.
#[must_use]
pub fn derive_view<'a>(items: &'a [Item], sort: &SortState, page: &PageState) -> Vec<&'a Item> {
    let _span = tracing::trace_span!(
        "derive_view",
        total = items.len(),
        key = ?sort.key,
        direction = ?sort.direction,
        page = page.index(),
        size = page.size()
    )
    .entered();

    let mut ordered = sorted(items, sort);
    let range = page.range(ordered.len());
    ordered.truncate(range.end);
    ordered.drain(..range.start);
    ordered
}

thread_local! {
    static NAME_COLLATOR: Option<Collator> = Collator::try_new(&Default::default(), CollatorOptions::new())
        .map_err(|e| tracing::warn!(error = %e, "root collator unavailable, falling back to code point order"))
        .ok();
}

fn compare_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(view: &[&'a Item]) -> Vec<&'a str> {
        view.iter().map(|i| i.name.as_str()).collect()
    }

    fn scenario() -> Vec<Item> {
        vec![Item::new("a", 5), Item::new("b", 3), Item::new("c", 5)]
    }

    #[test]
    fn count_descending_keeps_arrival_order_for_ties() {
        let items = scenario();
        let sort = SortState {
            key: SortKey::Count,
            direction: SortDirection::Descending,
        };
        let mut page = PageState::new(2);

        assert_eq!(names(&derive_view(&items, &sort, &page)), ["a", "c"]);
        page.set_page_index(1);
        assert_eq!(names(&derive_view(&items, &sort, &page)), ["b"]);
    }

    #[test]
    fn count_ascending_keeps_arrival_order_for_ties() {
        let items = scenario();
        let sort = SortState {
            key: SortKey::Count,
            direction: SortDirection::Ascending,
        };
        assert_eq!(names(&sorted(&items, &sort)), ["b", "a", "c"]);
    }

    #[test]
    fn default_sort_is_name_ascending() {
        let items = vec![Item::new("python", 1), Item::new("java", 2), Item::new("c#", 3)];
        assert_eq!(
            names(&sorted(&items, &SortState::default())),
            ["c#", "java", "python"]
        );
    }

    #[test]
    fn name_ordering_ignores_case_first() {
        let items = vec![
            Item::new("Banana", 1),
            Item::new("apple", 1),
            Item::new("Apple", 1),
            Item::new("cherry", 1),
        ];
        assert_eq!(
            names(&sorted(&items, &SortState::default())),
            ["apple", "Apple", "Banana", "cherry"]
        );
    }

    #[test]
    fn name_ordering_follows_collation_rules() {
        let items: Vec<Item> = ["c#", "c++", "c-preprocessor", "c", "café", "cafz"]
            .into_iter()
            .map(|name| Item::new(name, 1))
            .collect();
        assert_eq!(
            names(&sorted(&items, &SortState::default())),
            ["c", "c-preprocessor", "c#", "c++", "café", "cafz"]
        );

        let descending = SortState {
            key: SortKey::Name,
            direction: SortDirection::Descending,
        };
        assert_eq!(
            names(&sorted(&items, &descending)),
            ["cafz", "café", "c++", "c#", "c-preprocessor", "c"]
        );
    }

    #[test]
    fn identical_names_keep_arrival_order_in_both_directions() {
        let items = vec![Item::new("dup", 1), Item::new("dup", 2), Item::new("a", 3)];
        let mut sort = SortState::default();
        let counts: Vec<u64> = sorted(&items, &sort).iter().map(|i| i.count).collect();
        assert_eq!(counts, [3, 1, 2]);

        sort.set_sort(SortKey::Name);
        let counts: Vec<u64> = sorted(&items, &sort).iter().map(|i| i.count).collect();
        assert_eq!(counts, [1, 2, 3]);
    }

    #[test]
    fn set_sort_same_key_toggles_back_and_forth() {
        let mut sort = SortState::default();
        sort.set_sort(SortKey::Name);
        assert_eq!(sort.direction, SortDirection::Descending);
        sort.set_sort(SortKey::Name);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn set_sort_new_key_resets_to_ascending() {
        let mut sort = SortState {
            key: SortKey::Name,
            direction: SortDirection::Descending,
        };
        sort.set_sort(SortKey::Count);
        assert_eq!(
            sort,
            SortState {
                key: SortKey::Count,
                direction: SortDirection::Ascending
            }
        );
    }

    #[test]
    fn set_page_size_resets_index() {
        let mut page = PageState::new(20);
        page.set_page_index(4);
        page.set_page_size(50);
        assert_eq!(page.index(), 0);
        assert_eq!(page.size(), 50);
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        assert_eq!(PageState::new(0).size(), 1);
        let mut page = PageState::default();
        page.set_page_size(0);
        assert_eq!(page.size(), 1);
    }

    #[test]
    fn view_never_overflows_collection_end() {
        let items: Vec<Item> = (0..23).map(|i| Item::new(format!("t{i:02}"), i)).collect();
        for key in [SortKey::Name, SortKey::Count] {
            for direction in [SortDirection::Ascending, SortDirection::Descending] {
                let sort = SortState { key, direction };
                for size in [1, 5, 10, 23, 100] {
                    for index in 0..30 {
                        let mut page = PageState::new(size);
                        page.set_page_index(index);
                        let view = derive_view(&items, &sort, &page);
                        assert!(view.len() <= size);
                        assert!(view.len() <= items.len().saturating_sub(index * size));
                    }
                }
            }
        }
    }

    #[test]
    fn pages_concatenate_to_full_sorted_sequence() {
        let items: Vec<Item> = (0..47u64).map(|i| Item::new(format!("tag{}", i % 7), i % 5)).collect();
        let sort = SortState {
            key: SortKey::Count,
            direction: SortDirection::Descending,
        };
        let full = sorted(&items, &sort);

        for size in [1, 4, 10, 47, 50] {
            let mut page = PageState::new(size);
            let mut joined = Vec::new();
            for index in 0..page_count(items.len(), size) {
                page.set_page_index(index);
                joined.extend(derive_view(&items, &sort, &page));
            }
            assert_eq!(joined.len(), full.len());
            assert!(joined.iter().zip(&full).all(|(a, b)| std::ptr::eq(*a, *b)));
        }
    }

    #[test]
    fn page_past_end_is_empty() {
        let items = scenario();
        let mut page = PageState::new(2);
        page.set_page_index(usize::MAX);
        assert!(derive_view(&items, &SortState::default(), &page).is_empty());
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(2500, 30), 84);
    }
}
