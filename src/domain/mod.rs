//! Domain layer for the tagtable plugin.
//!
//! Core data types and rules, independent of Zellij APIs.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: The `(name, count)` record
//! - [`collection`]: Append-only accumulator of fetched items
//! - [`payload`]: Lenient decoding of page response bodies
//!
//! # Examples
//!
//! ```
//! use tagtable::domain::{payload::decode_page, Collection};
//!
//! let mut collection = Collection::new();
//! collection.append_decoded(decode_page(br#"{"items":[{"name":"rust","count":1}]}"#));
//! collection.freeze();
//! assert_eq!(collection.len(), 1);
//! ```

pub mod collection;
pub mod error;
pub mod item;
pub mod payload;

pub use collection::Collection;
pub use error::{Result, TagTableError};
pub use item::Item;
