//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the domain/store/
//! fetch layers. It owns every state transition of the search pane.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────── Fetch Completions ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode and sort key types
//! - [`state`]: Central application state container and view model computation
//! - [`view`]: Sort-then-filter derivation of the visible list
//!
//! # Example
//!
//! ```rust
//! use hnpane::app::{handle_event, AppState, Event};
//! use hnpane::ui::Theme;
//!
//! let mut state = AppState::new("tampa", Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), hnpane::HnPaneError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod view;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{EditField, InputMode, SortKey};
pub use state::AppState;
pub use view::derive;
