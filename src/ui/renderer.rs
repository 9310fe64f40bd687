//! Top-level rendering coordinator.
//!
//! Rendering is a pure function of the view model: compute it from
//! [`AppState`], draw the chrome, draw the body for the current loading state,
//! then draw the detail modal on top if one is open.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::layout::ModalRect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BodyView, UIViewModel};

/// Renders the plugin UI to stdout for a pane of `rows` x `cols`.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_chrome(vm, theme, rows, cols);

    match &vm.body {
        BodyView::Loading(loading) => components::render_loading(loading, theme, rows, cols),
        BodyView::Empty(empty) => components::render_empty_state(empty, theme, cols),
        BodyView::Table(table) => components::render_table_view(table, theme, rows, cols),
    }

    if let Some(detail) = &vm.detail {
        let rect = ModalRect::centered(rows, cols, detail.content_width());
        components::render_detail(detail, &rect, theme);
    }
}
