//! Item domain model.
//!
//! An [`Item`] is one `(name, count)` record from the remote tag catalog. Items are
//! immutable once fetched and have no identity beyond the pair itself.

/// One named, countable record from the remote catalog.
///
/// `name` is the display key and is never empty for items that made it into a
/// [`Collection`](super::Collection). `count` is non-negative by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub name: String,
    pub count: u64,
}

impl Item {
    /// Creates an item from a name and count.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagtable::domain::Item;
    ///
    /// let item = Item::new("rust", 42);
    /// assert_eq!(item.name, "rust");
    /// assert_eq!(item.count, 42);
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}
