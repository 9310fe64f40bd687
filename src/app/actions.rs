//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a `Vec<Action>`
//! after each event and the plugin shim executes them in order, which keeps
//! the whole state machine testable off-host.
//!
//! # Example
//!
//! ```rust
//! use tagtable::app::Action;
//!
//! let actions = vec![Action::ScheduleTimer { seconds: 10.0 }];
//! ```

use crate::fetch::PageRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Arms a one-shot timer; its expiry comes back as a timer event.
    ScheduleTimer {
        /// Delay before the timer fires.
        seconds: f64,
    },

    /// Issues an HTTP GET. The ticket travels in the request context so the
    /// response can be matched to the page that asked for it.
    WebRequest(PageRequest),
}
