//! Domain layer for the hnpane plugin.
//!
//! Core types independent of Zellij APIs: search hits, result pages and the
//! error types shared across the crate.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Search hit and page models
//!
//! # Examples
//!
//! ```
//! use hnpane::domain::{Item, SearchResult};
//!
//! let page = SearchResult {
//!     hits: vec![Item::new("1", Some("Show HN: hnpane"))],
//!     page: 0,
//!     nb_pages: None,
//! };
//! assert_eq!(page.hits.len(), 1);
//! ```

pub mod error;
pub mod item;

pub use error::{FetchFailure, HnPaneError, Result};
pub use item::{Item, SearchResult};
