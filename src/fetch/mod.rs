//! Remote page fetching.
//!
//! - [`request`]: fetch settings, URL construction and response correlation tickets
//! - [`fetcher`]: the sequential fetch task as an explicit state machine
//!
//! The plugin shim performs the actual I/O (`set_timeout`, `web_request`); this
//! module only decides what happens next.

pub mod fetcher;
pub mod request;

pub use fetcher::{FetchPhase, FetchStep, PageFetcher};
pub use request::{FetchSettings, FetchTicket, PageRequest, RequestBuilder};
