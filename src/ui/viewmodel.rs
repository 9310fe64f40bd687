//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready strings and flags only; all ordering,
//! slicing and windowing has already happened.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header information (title and total).
    pub header: HeaderInfo,

    /// Footer information (keybindings).
    pub footer: FooterInfo,

    /// Loading indicator or table, depending on `LoadingState`.
    pub body: BodyView,

    /// Detail modal, mounted only while the selection is visible.
    pub detail: Option<DetailInfo>,
}

/// Main area content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// Fetch still running.
    Loading(LoadingInfo),
    /// Fetch finished; collection ready for display.
    Table(TableView),
    /// Fetch finished without a single usable item.
    Empty(EmptyState),
}

/// Progress indicator shown while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingInfo {
    /// Primary line (e.g. "Fetching data...").
    pub message: String,
    /// Secondary line describing the current phase.
    pub progress: String,
}

/// Ready-state table with its pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub pagination: PaginationInfo,
    pub columns: ColumnHeaders,
    /// Rows of the current slice that fit on screen.
    pub rows: Vec<DisplayRow>,
    /// Optional status line (fetch error banner or diagnostics).
    pub status: Option<StatusLine>,
}

/// Pagination bar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// e.g. "Rows per page: 20".
    pub rows_per_page: String,
    /// e.g. "41-60 of 2500".
    pub range: String,
    /// e.g. "page 3/125".
    pub page: String,
}

/// Column header labels with sort indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeaders {
    pub name: String,
    pub count: String,
    pub name_active: bool,
    pub count_active: bool,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub name: String,
    pub count: String,
    /// Whether the keyboard cursor is on this row.
    pub is_cursor: bool,
}

/// Status line below the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Detail modal content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub name: String,
    pub count: String,
}

impl DetailInfo {
    pub const TITLE: &'static str = "Tag Details";

    #[must_use]
    pub fn name_line(&self) -> String {
        format!("Name: {}", self.name)
    }

    #[must_use]
    pub fn count_line(&self) -> String {
        format!("Count: {}", self.count)
    }

    /// Widest text line, which sizes the modal.
    #[must_use]
    pub fn content_width(&self) -> usize {
        [
            Self::TITLE.chars().count(),
            self.name_line().chars().count(),
            self.count_line().chars().count(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No tags fetched").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
