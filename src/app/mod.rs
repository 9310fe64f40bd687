//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain/fetch layers:
//!
//! ```text
//! Zellij event → Event → handle_event → AppState mutations → Actions → host calls
//!                              ↑                                   │
//!                              └──── timer / web response ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Sort key and direction
//! - [`selection`]: Detail view selection state
//! - [`state`]: Central application state container and view model computation
//! - [`table`]: Sort and paginate engine

pub mod actions;
pub mod handler;
pub mod modes;
pub mod selection;
pub mod state;
pub mod table;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{SortDirection, SortKey};
pub use state::AppState;
