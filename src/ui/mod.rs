//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types computed from state
//! - [`layout`]: Shared screen geometry for drawing and hit-testing
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Per-region renderers
//! - [`helpers`]: Cursor positioning and text fitting
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BodyView, DetailInfo, EmptyState, FooterInfo, HeaderInfo, TableView, UIViewModel,
};
