//! Application state management and view model computation.
//!
//! [`AppState`] is the single state object behind the plugin: the accumulated
//! collection, the fetch task, loading flag, sort/page/selection state and the
//! last known pane size. The event handler mutates it through the methods here;
//! the renderer only ever sees the [`UIViewModel`] computed from it.
//!
//! # Example
//!
//! ```rust
//! use tagtable::app::AppState;
//! use tagtable::app::table::PageState;
//! use tagtable::fetch::{FetchSettings, PageFetcher};
//! use tagtable::ui::Theme;
//!
//! let fetcher = PageFetcher::new(&FetchSettings::default(), 1);
//! let state = AppState::new(fetcher, PageState::default(), Theme::default(), "Tags".to_string());
//! assert!(state.loading);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! ```

use super::modes::SortKey;
use super::selection::SelectionState;
use super::table::{self, PageState, SortState, ROWS_PER_PAGE_OPTIONS};
use crate::domain::{Collection, Item, Result, TagTableError};
use crate::fetch::{FetchPhase, PageFetcher};
use crate::ui::helpers::truncate;
use crate::ui::layout::{
    self, ModalHit, ModalRect, COLUMN_HEADER_LINE, COUNT_COLUMN_WIDTH, FIRST_ROW_LINE,
    NAME_COLUMN_WIDTH,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BodyView, ColumnHeaders, DetailInfo, DisplayRow, EmptyState, FooterInfo, HeaderInfo,
    LoadingInfo, PaginationInfo, StatusLine, TableView, UIViewModel,
};
use chrono::{DateTime, Utc};

/// Longest name shown in the NAME column before it is cut with "...".
const NAME_DISPLAY_WIDTH: usize = NAME_COLUMN_WIDTH - 2;

/// Pane size from the most recent render.
///
/// Mouse events carry pane coordinates only, so hit-testing needs the size the
/// last frame was laid out for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Every item fetched so far, in arrival order.
    pub collection: Collection,

    /// The fetch task. `None` when the fetch could not even be configured.
    pub fetcher: Option<PageFetcher>,

    /// `LoadingState`: true from mount until the fetch reaches a terminal phase.
    pub loading: bool,

    /// Why the fetch stopped early, if it did.
    pub fetch_error: Option<TagTableError>,

    pub sort: SortState,
    pub page: PageState,
    pub selection: SelectionState,

    /// Keyboard cursor within the current slice.
    pub cursor: usize,

    /// Header title.
    pub title: String,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    pub viewport: Viewport,

    started_at: Option<DateTime<Utc>>,
}

impl AppState {
    /// Creates the state for a freshly mounted plugin.
    ///
    /// If the fetch task could not be built the state starts out already
    /// loaded, empty, and carrying the error.
    #[must_use]
    pub fn new(fetcher: Result<PageFetcher>, page: PageState, theme: Theme, title: String) -> Self {
        let (fetcher, loading, fetch_error) = match fetcher {
            Ok(fetcher) => (Some(fetcher), true, None),
            Err(e) => {
                tracing::error!(error = %e, "fetch could not be configured");
                (None, false, Some(e))
            }
        };

        let mut collection = Collection::new();
        if !loading {
            collection.freeze();
        }

        Self {
            collection,
            fetcher,
            loading,
            fetch_error,
            sort: SortState::default(),
            page,
            selection: SelectionState::default(),
            cursor: 0,
            title,
            theme,
            viewport: Viewport::default(),
            started_at: None,
        }
    }

    /// Records when the fetch task was started, for the completion log.
    pub fn mark_fetch_started(&mut self) {
        self.started_at = Some(Utc::now());
    }

    /// When the current fetch run left `Idle`, if it has.
    #[must_use]
    pub fn fetch_started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Ends the loading phase: freezes the collection and clears `loading`.
    ///
    /// Called exactly once per mount, on completion, abort or a refused start.
    pub fn finish_loading(&mut self, error: Option<TagTableError>) {
        let elapsed_secs = self
            .started_at
            .map(|start| (Utc::now() - start).num_seconds());

        match &error {
            Some(e) => tracing::error!(
                error = %e,
                kept_items = self.collection.len(),
                elapsed_secs = ?elapsed_secs,
                "fetch aborted, keeping partial results"
            ),
            None => tracing::info!(
                items = self.collection.len(),
                pages = self.collection.pages_appended(),
                empty_pages = self.collection.empty_pages(),
                dropped_items = self.collection.dropped_items(),
                elapsed_secs = ?elapsed_secs,
                "fetch completed"
            ),
        }

        self.collection.freeze();
        self.loading = false;
        self.fetch_error = error;
    }

    /// `totalCount` for the pagination controls.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.collection.len()
    }

    /// Number of pages at the current page size (at least 1 for display).
    #[must_use]
    pub fn page_total(&self) -> usize {
        table::page_count(self.total_count(), self.page.size()).max(1)
    }

    /// The rows of the current page in display order.
    #[must_use]
    pub fn current_view(&self) -> Vec<&Item> {
        table::derive_view(self.collection.items(), &self.sort, &self.page)
    }

    /// Whether the table accepts input (ready and no modal on top).
    #[must_use]
    pub fn table_interactive(&self) -> bool {
        !self.loading && !self.selection.is_visible()
    }

    /// Applies a sort request and returns the cursor to the top.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort.set_sort(key);
        self.cursor = 0;
        tracing::debug!(key = ?self.sort.key, direction = ?self.sort.direction, "sort changed");
    }

    /// Moves to page `index` if it exists. Returns whether anything changed.
    pub fn go_to_page(&mut self, index: usize) -> bool {
        let last = self.page_total() - 1;
        let index = index.min(last);
        if index == self.page.index() {
            return false;
        }
        self.page.set_page_index(index);
        self.cursor = 0;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.index().saturating_add(1))
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.page.index().saturating_sub(1))
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(0)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(usize::MAX)
    }

    /// Steps through [`ROWS_PER_PAGE_OPTIONS`] by `step` (+1 larger, -1 smaller).
    ///
    /// Changing the size always returns to the first page.
    pub fn step_page_size(&mut self, step: isize) -> bool {
        let current = ROWS_PER_PAGE_OPTIONS
            .iter()
            .position(|&size| size >= self.page.size())
            .unwrap_or(ROWS_PER_PAGE_OPTIONS.len() - 1);
        let target = current
            .saturating_add_signed(step)
            .min(ROWS_PER_PAGE_OPTIONS.len() - 1);
        let size = ROWS_PER_PAGE_OPTIONS[target];

        if size == self.page.size() {
            return false;
        }
        self.page.set_page_size(size);
        self.cursor = 0;
        tracing::debug!(size, "rows per page changed");
        true
    }

    /// Moves the cursor down within the current slice, wrapping to the top.
    pub fn move_cursor_down(&mut self) -> bool {
        let len = self.current_view().len();
        if len == 0 {
            return false;
        }
        self.cursor = (self.cursor + 1) % len;
        true
    }

    /// Moves the cursor up within the current slice, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) -> bool {
        let len = self.current_view().len();
        if len == 0 {
            return false;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        true
    }

    /// Opens the detail view for the slice row at `index`.
    pub fn open_row(&mut self, index: usize) -> bool {
        let Some(item) = self.current_view().get(index).map(|item| (*item).clone()) else {
            return false;
        };
        self.cursor = index;
        self.selection.select(item);
        true
    }

    /// Opens the detail view for the row under the cursor.
    pub fn open_at_cursor(&mut self) -> bool {
        self.open_row(self.cursor)
    }

    pub fn close_detail(&mut self) -> bool {
        let was_visible = self.selection.is_visible();
        self.selection.close();
        was_visible
    }

    /// Geometry of the detail modal for the current viewport.
    #[must_use]
    pub fn modal_rect(&self) -> Option<ModalRect> {
        let detail = self.selection.detail().map(detail_info)?;
        Some(ModalRect::centered(
            self.viewport.rows,
            self.viewport.cols,
            detail.content_width(),
        ))
    }

    /// Classifies a click against the open detail modal.
    #[must_use]
    pub fn modal_hit(&self, line: usize, col: usize) -> Option<ModalHit> {
        self.modal_rect().map(|rect| rect.hit(line, col))
    }

    /// Maps a pane line to an index into the current slice.
    #[must_use]
    pub fn row_at_line(&self, line: usize) -> Option<usize> {
        let offset = line.checked_sub(FIRST_ROW_LINE)?;
        let (start, end) = self.row_window(self.viewport.rows, self.current_view().len());
        let index = start + offset;
        (index < end).then_some(index)
    }

    /// Maps a click on the column header line to the sort key under it.
    #[must_use]
    pub fn column_at(&self, line: usize, col: usize) -> Option<SortKey> {
        if line != COLUMN_HEADER_LINE {
            return None;
        }
        Some(if col < NAME_COLUMN_WIDTH {
            SortKey::Name
        } else {
            SortKey::Count
        })
    }

    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = Viewport { rows, cols };
    }

    /// Whether a status line is shown under the table.
    #[must_use]
    pub fn has_status_line(&self) -> bool {
        !self.loading
            && (self.fetch_error.is_some()
                || self.collection.empty_pages() > 0
                || self.collection.dropped_items() > 0)
    }

    /// Visible part of a slice of `len` rows on a pane `rows` tall, kept
    /// around the cursor. Empty when the pane has no room for rows.
    fn row_window(&self, rows: usize, len: usize) -> (usize, usize) {
        let available = layout::available_rows(rows, self.has_status_line());
        if available == 0 {
            return (0, 0);
        }
        if len <= available {
            return (0, len);
        }

        let start = self.cursor.saturating_sub(available / 2).min(len - available);
        (start, start + available)
    }

    /// Computes a renderable UI view model from current state and pane size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = if self.loading {
            BodyView::Loading(self.compute_loading())
        } else if self.collection.is_empty() {
            BodyView::Empty(self.compute_empty_state())
        } else {
            BodyView::Table(self.compute_table(rows, cols))
        };

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            body,
            detail: self.selection.detail().map(detail_info),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        if self.loading {
            HeaderInfo {
                title: format!(" {} ", self.title),
            }
        } else {
            HeaderInfo {
                title: format!(" {} ({}) ", self.title, self.total_count()),
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.selection.is_visible() {
            "Esc/Enter/q: close  click outside: close"
        } else if self.loading {
            "q: quit"
        } else {
            "n/c: sort  h/l: page  g/G: first/last  +/-: rows  j/k: move  Enter: details  q: quit"
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_loading(&self) -> LoadingInfo {
        let progress = match self.fetcher.as_ref().map(PageFetcher::phase) {
            Some(FetchPhase::Idle) | None => "Waiting for web access permission".to_string(),
            Some(FetchPhase::WarmingUp) => "Warming up before the first request".to_string(),
            Some(FetchPhase::Awaiting { page }) => format!(
                "Page {page} of {} · {} tags so far",
                self.fetcher.as_ref().map_or(0, PageFetcher::page_count),
                self.collection.len()
            ),
            Some(_) => "Finishing".to_string(),
        };
        LoadingInfo {
            message: "Fetching data...".to_string(),
            progress,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        let subtitle = self.fetch_error.as_ref().map_or_else(
            || "The catalog returned no usable items".to_string(),
            ToString::to_string,
        );
        EmptyState {
            message: "No tags fetched".to_string(),
            subtitle,
        }
    }

    fn compute_table(&self, rows: usize, cols: usize) -> TableView {
        let view = self.current_view();
        let total = self.total_count();
        let range = self.page.range(total);
        let name_width = NAME_DISPLAY_WIDTH
            .min(cols.saturating_sub(COUNT_COLUMN_WIDTH + 2))
            .max(4);

        let (start, end) = self.row_window(rows, view.len());
        let rows = view[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| DisplayRow {
                name: truncate(&item.name, name_width),
                count: item.count.to_string(),
                is_cursor: start + offset == self.cursor,
            })
            .collect();

        let (first, last) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };

        TableView {
            pagination: PaginationInfo {
                rows_per_page: format!("Rows per page: {}", self.page.size()),
                range: format!("{first}-{last} of {total}"),
                page: format!("page {}/{}", self.page.index() + 1, self.page_total()),
            },
            columns: self.compute_columns(),
            rows,
            status: self.compute_status(),
        }
    }

    fn compute_columns(&self) -> ColumnHeaders {
        let arrow = self.sort.direction.arrow();
        let label = |text: &str, key: SortKey| {
            if self.sort.key == key {
                format!("{text} {arrow}")
            } else {
                text.to_string()
            }
        };
        ColumnHeaders {
            name: label("NAME", SortKey::Name),
            count: label("COUNT", SortKey::Count),
            name_active: self.sort.key == SortKey::Name,
            count_active: self.sort.key == SortKey::Count,
        }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        if let Some(e) = &self.fetch_error {
            return Some(StatusLine {
                text: format!("Fetch stopped early ({e}). Showing tags from earlier pages."),
                is_error: true,
            });
        }

        let empty = self.collection.empty_pages();
        let dropped = self.collection.dropped_items();
        if empty == 0 && dropped == 0 {
            return None;
        }
        Some(StatusLine {
            text: format!("{empty} empty page(s), {dropped} record(s) skipped"),
            is_error: false,
        })
    }
}

fn detail_info(item: &Item) -> DetailInfo {
    DetailInfo {
        name: item.name.clone(),
        count: item.count.to_string(),
    }
}
