//! Tagtable: a Zellij plugin that pulls a paginated tag catalog from a remote
//! API and shows it as a sortable, paginated table with a detail modal.
//!
//! - Sequential page fetching with a warm-up delay, abort on the first failed
//!   page, and tolerance for malformed payloads
//! - Client-side sorting by name or count, both directions, stable
//! - Client-side pagination with selectable rows per page
//! - Keyboard and mouse driven detail view for a single tag
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, actions                          │
//! │  - Sort/paginate engine, selection                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                    │
//! ┌───────────────────┐              ┌───────────────────┐
//! │ Fetch Layer       │              │ UI Layer          │
//! │ (fetch/)          │              │ (ui/)             │
//! │ - Page requests   │              │ - Rendering       │
//! │ - Fetch task      │              │ - Layout/hit test │
//! └───────────────────┘              │ - Theming         │
//!         │                          └───────────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): Item, Collection, payload, errors │
//! │  Infrastructure (infrastructure/): sandbox paths     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing + OpenTelemetry, OTLP/JSON file export   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/tagtable.wasm" {
//!         site "stackoverflow"
//!         page_count "25"
//!         warmup_seconds "10"
//!         rows_per_page "20"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. `load`: parse [`Config`], initialize tracing, [`initialize`] the state,
//!    subscribe to events and request web access.
//! 2. Permission granted: the fetch task starts with its warm-up timer.
//! 3. Timer and web responses drive the task page by page; each page is
//!    appended to the collection.
//! 4. The last page (or the first failure) ends loading and the table renders.
//!
//! # Example
//!
//! ```rust
//! use tagtable::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! // Execute actions...
//! # Ok::<(), tagtable::TagTableError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, SortDirection, SortKey};
pub use domain::{Item, Result, TagTableError};
pub use ui::Theme;

use app::table::{PageState, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};
use fetch::{FetchSettings, PageFetcher};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Largest `pagesize` the catalog API accepts.
const MAX_PAGE_SIZE: u32 = 100;

/// Plugin configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Endpoint, site and paging of the fetch run.
    pub fetch: FetchSettings,

    /// Initial rows per page; always one of [`ROWS_PER_PAGE_OPTIONS`].
    pub rows_per_page: usize,

    /// Built-in theme name.
    pub theme_name: Option<String>,

    /// Path to a custom theme TOML file (overrides `theme_name`).
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing keys take their defaults. Values that do not parse, or parse to
    /// something out of range, are logged at debug and also take the default.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use tagtable::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("site".to_string(), "superuser".to_string());
    /// map.insert("page_count".to_string(), "3".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.fetch.site, "superuser");
    /// assert_eq!(config.fetch.page_count, 3);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let fetch = FetchSettings {
            endpoint: text("endpoint").unwrap_or(defaults.fetch.endpoint),
            site: text("site").unwrap_or(defaults.fetch.site),
            page_size: parse_checked(config, "page_size", defaults.fetch.page_size, |n| {
                (1..=MAX_PAGE_SIZE).contains(n)
            }),
            page_count: parse_checked(config, "page_count", defaults.fetch.page_count, |_| true),
            warmup_seconds: parse_checked(config, "warmup_seconds", defaults.fetch.warmup_seconds, |s| {
                s.is_finite() && *s >= 0.0
            }),
        };

        Self {
            fetch,
            rows_per_page: parse_checked(config, "rows_per_page", defaults.rows_per_page, |n| {
                ROWS_PER_PAGE_OPTIONS.contains(n)
            }),
            theme_name: text("theme"),
            theme_file: text("theme_file").map(|p| infrastructure::expand_tilde(&p)),
            trace_level: text("trace_level").unwrap_or(defaults.trace_level),
        }
    }
}

fn parse_checked<T>(config: &BTreeMap<String, String>, key: &str, default: T, valid: impl Fn(&T) -> bool) -> T
where
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = config.get(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        _ => {
            tracing::debug!(key, value = %raw, default = ?default, "invalid config value, using default");
            default
        }
    }
}

/// Builds the initial state for a freshly loaded plugin.
///
/// The fetch task is created but not started; it starts once web access is
/// granted. An unusable endpoint leaves the state loaded, empty, and carrying
/// the error.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.fetch.endpoint, site = %config.fetch.site, "initializing tagtable plugin");

    let theme = Theme::resolve(config.theme_name.as_deref(), config.theme_file.as_deref());
    let run = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
    let fetcher = PageFetcher::new(&config.fetch, run);
    let title = format!("Tags · {}", config.fetch.site);

    AppState::new(fetcher, PageState::new(config.rows_per_page), theme, title)
}
