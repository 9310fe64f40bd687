//! Zellij plugin entry point.
//!
//! A thin shim: Zellij events are translated into [`tagtable::Event`]s, handed
//! to [`tagtable::handle_event`], and the returned [`tagtable::Action`]s are
//! executed against the host API. All decisions live in the library.
//!
//! The shim only exists on the WASM target; native builds (tests, docs) get an
//! empty `main`.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
use plugin::State;

#[cfg(target_family = "wasm")]
register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {}

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use tagtable::fetch::FetchTicket;
    use tagtable::{handle_event, Action, Config, Event, SortKey};
    use zellij_tile::prelude::*;

    /// Plugin state registered with Zellij.
    pub struct State {
        app: tagtable::AppState,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: tagtable::initialize(&Config::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            tagtable::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(config = ?config, "parsed configuration");
            self.app = tagtable::initialize(&config);

            subscribe(&[
                EventType::Key,
                EventType::Mouse,
                EventType::Timer,
                EventType::WebRequestResult,
                EventType::PermissionRequestResult,
                EventType::BeforeClose,
            ]);
            request_permission(&[PermissionType::WebAccess]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
            let _guard = span.entered();

            let Some(our_event) = self.map_event(event) else {
                return false;
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render,
                        "event handled"
                    );
                    for action in &actions {
                        Self::execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::error!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            self.app.set_viewport(rows, cols);
            tagtable::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        fn event_name(event: &zellij_tile::prelude::Event) -> &'static str {
            match event {
                zellij_tile::prelude::Event::Key(_) => "Key",
                zellij_tile::prelude::Event::Mouse(_) => "Mouse",
                zellij_tile::prelude::Event::Timer(_) => "Timer",
                zellij_tile::prelude::Event::WebRequestResult(..) => "WebRequestResult",
                zellij_tile::prelude::Event::PermissionRequestResult(_) => "PermissionRequestResult",
                zellij_tile::prelude::Event::BeforeClose => "BeforeClose",
                _ => "Other",
            }
        }

        fn map_event(&self, event: zellij_tile::prelude::Event) -> Option<Event> {
            match event {
                zellij_tile::prelude::Event::Key(key) => self.map_key_event(&key),
                zellij_tile::prelude::Event::Mouse(mouse) => Self::map_mouse_event(mouse),
                zellij_tile::prelude::Event::Timer(elapsed) => Some(Event::Timer { elapsed }),
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    Some(Event::WebResponse {
                        ticket: FetchTicket::from_context(&context),
                        status,
                        body,
                    })
                }
                zellij_tile::prelude::Event::PermissionRequestResult(status) => Some(match status {
                    PermissionStatus::Granted => Event::PermissionsGranted,
                    PermissionStatus::Denied => {
                        tracing::warn!("web access denied - nothing can be fetched");
                        Event::PermissionsDenied
                    }
                }),
                zellij_tile::prelude::Event::BeforeClose => Some(Event::BeforeClose),
                _ => None,
            }
        }

        /// While the detail modal is open it owns the keyboard.
        fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
            tracing::trace!(bare_key = ?key.bare_key, "key event");

            if self.app.selection.is_visible() {
                return match key.bare_key {
                    BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseDetail),
                    _ => None,
                };
            }

            Some(match key.bare_key {
                BareKey::Char('q') => Event::CloseFocus,
                BareKey::Char('n') => Event::SortBy(SortKey::Name),
                BareKey::Char('c') => Event::SortBy(SortKey::Count),
                BareKey::Left | BareKey::Char('h') | BareKey::PageUp => Event::PrevPage,
                BareKey::Right | BareKey::Char('l') | BareKey::PageDown => Event::NextPage,
                BareKey::Char('g') | BareKey::Home => Event::FirstPage,
                BareKey::Char('G') | BareKey::End => Event::LastPage,
                BareKey::Char('+' | '=') => Event::GrowPageSize,
                BareKey::Char('-') => Event::ShrinkPageSize,
                BareKey::Down | BareKey::Char('j') => Event::CursorDown,
                BareKey::Up | BareKey::Char('k') => Event::CursorUp,
                BareKey::Enter => Event::OpenSelected,
                _ => return None,
            })
        }

        fn map_mouse_event(mouse: Mouse) -> Option<Event> {
            match mouse {
                Mouse::LeftClick(line, col) => usize::try_from(line)
                    .ok()
                    .map(|line| Event::Click { line, col }),
                Mouse::ScrollUp(_) => Some(Event::CursorUp),
                Mouse::ScrollDown(_) => Some(Event::CursorDown),
                _ => None,
            }
        }

        #[tracing::instrument(level = "debug")]
        fn execute_action(action: &Action) {
            match action {
                Action::CloseFocus => hide_self(),
                Action::ScheduleTimer { seconds } => set_timeout(*seconds),
                Action::WebRequest(request) => {
                    let headers = BTreeMap::from([(
                        "Accept".to_string(),
                        "application/json".to_string(),
                    )]);
                    web_request(
                        &request.url,
                        HttpVerb::Get,
                        headers,
                        vec![],
                        request.ticket.to_context(),
                    );
                }
            }
        }
    }
}
