//! Sort mode types.
//!
//! The table is ordered by one [`SortKey`] in one [`SortDirection`]. Both are
//! small `Copy` enums so they can be matched on freely by the engine, the
//! footer and the column header renderer.
//!
//! # Example
//!
//! ```rust
//! use tagtable::app::modes::{SortDirection, SortKey};
//!
//! assert_eq!(SortKey::default(), SortKey::Name);
//! assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
//! ```

/// Field the collection is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Locale-style caseless ordering of tag names.
    #[default]
    Name,
    /// Numeric ordering of usage counts.
    Count,
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow shown next to the active column header.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}
