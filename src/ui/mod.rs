//! Terminal rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Frame entry point
//! - [`components`]: Header, input box, table, status panel and footer
//! - [`helpers`]: Cursor positioning, padding and match highlighting
//! - [`theme`]: Color schemes and ANSI escapes
//!
//! # Example
//!
//! ```rust
//! use hnpane::app::AppState;
//! use hnpane::ui::{render, Theme};
//!
//! let state = AppState::new("tampa", Theme::default());
//! render(&state, 24, 80);
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DisplayItem, FooterInfo, HeaderInfo, InputBarInfo, StatusKind, StatusPanel, UIViewModel,
};
