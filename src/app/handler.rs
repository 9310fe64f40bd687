//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes happen. The plugin shim
//! translates Zellij events into [`Event`]s, calls the handler, and executes the
//! returned [`Action`]s. The boolean in the result says whether a re-render is
//! needed.
//!
//! # Event Types
//!
//! - **Lifecycle**: `PermissionsGranted`, `PermissionsDenied`, `BeforeClose`
//! - **Fetch**: `Timer`, `WebResponse`
//! - **Table**: `SortBy`, paging, page size, cursor movement, `OpenSelected`
//! - **Detail view**: `CloseDetail`
//! - **Pointer**: `Click`, routed to the modal when it is open
//!
//! Table events are ignored while loading and while the detail view is open,
//! so nothing reaches the table underneath the modal.
//!
//! # Example
//!
//! ```rust
//! use tagtable::app::{handle_event, Action, AppState, Event};
//! use tagtable::app::table::PageState;
//! use tagtable::fetch::{FetchSettings, PageFetcher};
//! use tagtable::ui::Theme;
//!
//! let fetcher = PageFetcher::new(&FetchSettings::default(), 1);
//! let mut state = AppState::new(fetcher, PageState::default(), Theme::default(), "Tags".to_string());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(matches!(actions[0], Action::ScheduleTimer { .. }));
//! # Ok::<(), tagtable::domain::TagTableError>(())
//! ```

use super::modes::SortKey;
use crate::app::{Action, AppState};
use crate::domain::error::{Result, TagTableError};
use crate::fetch::{FetchStep, FetchTicket};
use crate::ui::layout::ModalHit;

/// Events triggered by user input or the plugin host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Web access was granted; starts the fetch.
    PermissionsGranted,
    /// Web access was refused; loading ends with nothing fetched.
    PermissionsDenied,
    /// A timer armed by [`Action::ScheduleTimer`] fired.
    Timer {
        elapsed: f64,
    },
    /// A web request finished.
    WebResponse {
        /// Ticket recovered from the request context, if any.
        ticket: Option<FetchTicket>,
        status: u16,
        body: Vec<u8>,
    },
    /// The plugin is being unloaded; the fetch must stop.
    BeforeClose,

    /// Sort by a column (same column flips the direction).
    SortBy(SortKey),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Next larger rows-per-page option.
    GrowPageSize,
    /// Next smaller rows-per-page option.
    ShrinkPageSize,
    CursorUp,
    CursorDown,
    /// Opens the detail view for the row under the cursor.
    OpenSelected,

    /// Mouse click at a zero-based pane position.
    Click {
        line: usize,
        col: usize,
    },

    /// Closes the detail view.
    CloseDetail,
    /// Hides the plugin pane.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order by the plugin
/// runtime.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the shim's error path uniform.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::PermissionsGranted => {
            let Some(fetcher) = state.fetcher.as_mut() else {
                return Ok((false, vec![]));
            };
            let step = fetcher.start();
            if !matches!(step, FetchStep::Ignore) {
                state.mark_fetch_started();
            }
            Ok(apply_fetch_step(state, step))
        }
        Event::PermissionsDenied => {
            if !state.loading {
                return Ok((false, vec![]));
            }
            if let Some(fetcher) = state.fetcher.as_mut() {
                fetcher.cancel();
            }
            state.finish_loading(Some(TagTableError::PermissionDenied));
            Ok((true, vec![]))
        }
        Event::Timer { elapsed } => {
            let Some(fetcher) = state.fetcher.as_mut() else {
                return Ok((false, vec![]));
            };
            tracing::trace!(elapsed, "timer fired");
            let step = fetcher.on_timer();
            Ok(apply_fetch_step(state, step))
        }
        Event::WebResponse {
            ticket,
            status,
            body,
        } => {
            let Some(fetcher) = state.fetcher.as_mut() else {
                return Ok((false, vec![]));
            };
            let step = fetcher.on_response(*ticket, *status, body);
            Ok(apply_fetch_step(state, step))
        }
        Event::BeforeClose => {
            if let Some(fetcher) = state.fetcher.as_mut() {
                fetcher.cancel();
            }
            Ok((false, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::CloseDetail => Ok((state.close_detail(), vec![])),
        Event::Click { line, col } => Ok((handle_click(state, *line, *col), vec![])),
        table_event => {
            if !state.table_interactive() {
                tracing::trace!("table input ignored");
                return Ok((false, vec![]));
            }
            Ok((handle_table_event(state, table_event), vec![]))
        }
    }
}

fn handle_table_event(state: &mut AppState, event: &Event) -> bool {
    match event {
        Event::SortBy(key) => {
            state.sort_by(*key);
            true
        }
        Event::NextPage => state.next_page(),
        Event::PrevPage => state.prev_page(),
        Event::FirstPage => state.first_page(),
        Event::LastPage => state.last_page(),
        Event::GrowPageSize => state.step_page_size(1),
        Event::ShrinkPageSize => state.step_page_size(-1),
        Event::CursorUp => state.move_cursor_up(),
        Event::CursorDown => state.move_cursor_down(),
        Event::OpenSelected => state.open_at_cursor(),
        _ => false,
    }
}

/// Routes a click to the modal when it is open, otherwise to the table.
fn handle_click(state: &mut AppState, line: usize, col: usize) -> bool {
    if let Some(hit) = state.modal_hit(line, col) {
        tracing::trace!(line, col, hit = ?hit, "modal click");
        return match hit {
            ModalHit::CloseButton | ModalHit::Outside => state.close_detail(),
            ModalHit::Content => false,
        };
    }

    if state.loading {
        return false;
    }

    if let Some(key) = state.column_at(line, col) {
        state.sort_by(key);
        return true;
    }

    state
        .row_at_line(line)
        .is_some_and(|index| state.open_row(index))
}

/// Applies the outcome of a fetcher transition to the state.
fn apply_fetch_step(state: &mut AppState, step: FetchStep) -> (bool, Vec<Action>) {
    match step {
        FetchStep::Wait { seconds } => (true, vec![Action::ScheduleTimer { seconds }]),
        FetchStep::Request(request) => {
            tracing::debug!(url = %request.url, page = request.ticket.page, "requesting page");
            (true, vec![Action::WebRequest(request)])
        }
        FetchStep::Deliver {
            page,
            decoded,
            next,
        } => {
            state.collection.append_decoded(decoded);
            tracing::debug!(page, total = state.collection.len(), "page appended");
            match next {
                Some(request) => (true, vec![Action::WebRequest(request)]),
                None => {
                    state.finish_loading(None);
                    (true, vec![])
                }
            }
        }
        FetchStep::Complete => {
            state.finish_loading(None);
            (true, vec![])
        }
        FetchStep::Abort(error) => {
            state.finish_loading(Some(error));
            (true, vec![])
        }
        FetchStep::Ignore => (false, vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::table::PageState;
    use crate::domain::Item;
    use crate::fetch::{FetchSettings, PageFetcher, PageRequest};
    use crate::ui::layout::{COLUMN_HEADER_LINE, FIRST_ROW_LINE};
    use crate::ui::Theme;

    const RUN: u64 = 7;

    fn loading_state(page_count: u32) -> AppState {
        let settings = FetchSettings {
            page_count,
            warmup_seconds: 10.0,
            ..FetchSettings::default()
        };
        let mut state = AppState::new(
            PageFetcher::new(&settings, RUN),
            PageState::default(),
            Theme::default(),
            "Tags".to_string(),
        );
        state.set_viewport(40, 80);
        state
    }

    fn ready_state(items: Vec<Item>) -> AppState {
        let mut state = loading_state(1);
        state.collection.append(items);
        state.finish_loading(None);
        state
    }

    fn page(names: &[(&str, u64)]) -> Vec<u8> {
        let items: Vec<String> = names
            .iter()
            .map(|(name, count)| format!(r#"{{"name":"{name}","count":{count}}}"#))
            .collect();
        format!(r#"{{"items":[{}]}}"#, items.join(",")).into_bytes()
    }

    fn respond(state: &mut AppState, page_no: u32, status: u16, body: Vec<u8>) -> (bool, Vec<Action>) {
        handle_event(
            state,
            &Event::WebResponse {
                ticket: Some(FetchTicket { run: RUN, page: page_no }),
                status,
                body,
            },
        )
        .unwrap()
    }

    fn request_of(actions: &[Action]) -> &PageRequest {
        match actions {
            [Action::WebRequest(request)] => request,
            other => panic!("expected one web request, got {other:?}"),
        }
    }

    #[test]
    fn full_fetch_sequence() {
        let mut state = loading_state(2);

        let (render, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::ScheduleTimer { seconds: 10.0 }]);

        let (_, actions) = handle_event(&mut state, &Event::Timer { elapsed: 10.0 }).unwrap();
        assert_eq!(request_of(&actions).ticket.page, 1);

        let (_, actions) = respond(&mut state, 1, 200, page(&[("rust", 10)]));
        assert_eq!(request_of(&actions).ticket.page, 2);
        assert!(state.loading);

        let (render, actions) = respond(&mut state, 2, 200, page(&[("go", 5)]));
        assert!(render);
        assert!(actions.is_empty());
        assert!(!state.loading);
        assert!(state.collection.is_frozen());
        assert_eq!(state.total_count(), 2);
        assert!(state.fetch_error.is_none());
    }

    #[test]
    fn failed_page_keeps_earlier_items() {
        let mut state = loading_state(3);
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(&mut state, &Event::Timer { elapsed: 10.0 }).unwrap();
        respond(&mut state, 1, 200, page(&[("a", 1), ("b", 2)]));

        let (render, actions) = respond(&mut state, 2, 502, b"bad gateway".to_vec());
        assert!(render);
        assert!(actions.is_empty());
        assert!(!state.loading);
        assert_eq!(state.total_count(), 2);
        assert!(matches!(
            state.fetch_error,
            Some(TagTableError::Http { page: 2, status: 502, .. })
        ));
    }

    #[test]
    fn stale_responses_are_ignored() {
        let mut state = loading_state(2);
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(&mut state, &Event::Timer { elapsed: 10.0 }).unwrap();

        let (render, actions) = respond(&mut state, 2, 200, page(&[("x", 1)]));
        assert!(!render);
        assert!(actions.is_empty());

        let (render, _) = handle_event(
            &mut state,
            &Event::WebResponse {
                ticket: None,
                status: 200,
                body: page(&[("x", 1)]),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.collection.is_empty());
    }

    #[test]
    fn repeated_grant_keeps_original_start_time() {
        let mut state = loading_state(2);
        assert!(state.fetch_started_at().is_none());

        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let started = state.fetch_started_at();
        assert!(started.is_some());

        std::thread::sleep(std::time::Duration::from_millis(5));
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.fetch_started_at(), started);
    }

    #[test]
    fn before_close_cancels_fetch() {
        let mut state = loading_state(2);
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(&mut state, &Event::Timer { elapsed: 10.0 }).unwrap();
        handle_event(&mut state, &Event::BeforeClose).unwrap();

        let (render, actions) = respond(&mut state, 1, 200, page(&[("x", 1)]));
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.collection.is_empty());
    }

    #[test]
    fn denied_permission_ends_loading() {
        let mut state = loading_state(2);
        let (render, _) = handle_event(&mut state, &Event::PermissionsDenied).unwrap();
        assert!(render);
        assert!(!state.loading);
        assert!(matches!(state.fetch_error, Some(TagTableError::PermissionDenied)));

        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn table_input_ignored_while_loading() {
        let mut state = loading_state(2);
        for event in [Event::SortBy(SortKey::Count), Event::NextPage, Event::OpenSelected] {
            let (render, _) = handle_event(&mut state, &event).unwrap();
            assert!(!render);
        }
        assert_eq!(state.sort, Default::default());
    }

    #[test]
    fn sort_events_follow_toggle_rule() {
        use crate::app::modes::SortDirection;

        let mut state = ready_state(vec![Item::new("a", 1)]);
        handle_event(&mut state, &Event::SortBy(SortKey::Name)).unwrap();
        assert_eq!(state.sort.direction, SortDirection::Descending);

        handle_event(&mut state, &Event::SortBy(SortKey::Count)).unwrap();
        assert_eq!(state.sort.key, SortKey::Count);
        assert_eq!(state.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn header_click_sorts_row_click_selects() {
        let mut state = ready_state(vec![Item::new("b", 1), Item::new("a", 2)]);

        let (render, _) = handle_event(&mut state, &Event::Click { line: COLUMN_HEADER_LINE, col: 60 }).unwrap();
        assert!(render);
        assert_eq!(state.sort.key, SortKey::Count);

        let (render, _) = handle_event(&mut state, &Event::Click { line: FIRST_ROW_LINE + 1, col: 3 }).unwrap();
        assert!(render);
        assert_eq!(state.selection.detail(), Some(&Item::new("a", 2)));
    }

    #[test]
    fn modal_swallows_table_input() {
        let mut state = ready_state(vec![Item::new("a", 1), Item::new("b", 2)]);
        handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(state.selection.is_visible());

        let (render, _) = handle_event(&mut state, &Event::CursorDown).unwrap();
        assert!(!render);
        assert_eq!(state.cursor, 0);

        let rect = state.modal_rect().expect("modal open");
        let (render, _) = handle_event(&mut state, &Event::Click { line: rect.top + 1, col: rect.left + 1 }).unwrap();
        assert!(!render);
        assert!(state.selection.is_visible());
    }

    #[test]
    fn modal_closes_once_on_button_or_outside() {
        let mut state = ready_state(vec![Item::new("a", 1)]);
        handle_event(&mut state, &Event::OpenSelected).unwrap();

        let rect = state.modal_rect().expect("modal open");
        let button = Event::Click {
            line: rect.button_line(),
            col: rect.button_columns().start,
        };
        let (render, _) = handle_event(&mut state, &button).unwrap();
        assert!(render);
        assert!(!state.selection.is_visible());

        // Outside the box.
        handle_event(&mut state, &Event::OpenSelected).unwrap();
        let (render, _) = handle_event(&mut state, &Event::Click { line: 0, col: 0 }).unwrap();
        assert!(render);
        assert!(!state.selection.is_visible());
        assert_eq!(state.selection.selected_item(), Some(&Item::new("a", 1)));

        let (render, _) = handle_event(&mut state, &Event::CloseDetail).unwrap();
        assert!(!render);
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = ready_state(vec![]);
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
