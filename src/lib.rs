//! hnpane: a Zellij plugin for searching Hacker News from a floating pane.
//!
//! The plugin keeps a client-side result set for one search term:
//! - Submitting a term fetches page 0 and replaces whatever was shown
//! - "More" fetches the next page and appends it
//! - A live filter narrows the shown hits by title without touching the network
//! - Hits can be sorted by title, author, comments or points, and dismissed

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - Key mapping, web requests, opener command        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling (query lifecycle)                 │
//! │  - Action dispatching                               │
//! │  - Sort-then-filter view derivation                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store Layer   │   │ Fetch Layer   │
//! │ (ui/)         │   │ (store/)      │   │ (fetch/)      │
//! │ - Rendering   │   │ - Page merge  │   │ - Request URL │
//! │ - Theming     │   │ - Dismissal   │   │ - Decoding    │
//! │ - Components  │   │               │   │ - Trace ctx   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Hit and page models (domain/item)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/hnpane.wasm" {
//!         default_query "rust"
//!         default_sort "points"
//!         open_command "xdg-open"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Request Lifecycle
//!
//! 1. A key or the initial load produces `Event::SubmitQuery` / `Event::RequestMore`.
//! 2. `handle_event` raises the loading flag and returns `Action::Fetch`.
//! 3. The shim passes the request to its [`fetch::Fetcher`], which calls
//!    Zellij's `web_request` and returns immediately.
//! 4. Zellij later delivers `WebRequestResult`; the shim decodes it with
//!    [`fetch::decode_response`] into `Event::FetchCompleted`.
//! 5. `handle_event` merges the page (or records the failure) and clears the
//!    loading flag.
//!
//! Overlapping requests are neither cancelled nor sequenced; pages are merged
//! in the order their responses arrive.
//!
//! # Example
//!
//! ```rust
//! use hnpane::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config::default();
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(
//!     &mut state,
//!     &Event::SubmitQuery { term: config.default_query.clone() },
//! )?;
//! assert!(matches!(&actions[0], Action::Fetch(request) if request.page == 0));
//! # Ok::<(), hnpane::HnPaneError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod observability;
pub mod store;
pub mod ui;

pub use app::{handle_event, Action, AppState, EditField, Event, InputMode, SortKey};
pub use domain::{FetchFailure, HnPaneError, Item, Result, SearchResult};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Query submitted when the plugin starts.
pub const DEFAULT_QUERY: &str = "tampa";

/// Command used to open links.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's plugin options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search API root, without trailing slash.
    pub base_url: String,

    /// Term searched on startup. May be empty.
    pub default_query: String,

    /// Initial sort key.
    pub default_sort: SortKey,

    /// Program invoked with a hit's link as its only argument.
    pub open_command: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; `~` refers to the host home directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: fetch::DEFAULT_BASE_URL.to_string(),
            default_query: DEFAULT_QUERY.to_string(),
            default_sort: SortKey::None,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the option map Zellij passes to `load`.
    ///
    /// Unknown keys are ignored and unparsable values fall back to their
    /// defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use hnpane::{Config, SortKey};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("default_query".to_string(), "rust".to_string());
    /// map.insert("default_sort".to_string(), "Points".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.default_query, "rust");
    /// assert_eq!(config.default_sort, SortKey::Points);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let base_url = config
            .get("base_url")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);

        let default_sort = config
            .get("default_sort")
            .and_then(|value| match value.parse::<SortKey>() {
                Ok(key) => Some(key),
                Err(e) => {
                    tracing::debug!(error = %e, "ignoring default_sort");
                    None
                }
            })
            .unwrap_or(defaults.default_sort);

        let open_command = config
            .get("open_command")
            .map(|cmd| cmd.trim().to_string())
            .filter(|cmd| !cmd.is_empty())
            .unwrap_or(defaults.open_command);

        Self {
            base_url,
            default_query: config
                .get("default_query")
                .cloned()
                .unwrap_or(defaults.default_query),
            default_sort,
            open_command,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Theme from `theme_file`, then `theme`, then the default. Load failures
    /// are logged and fall through to the default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial state: configured theme and sort key, the default query
/// as search term, no results yet.
///
/// No request is issued here. The shim submits the default query once Zellij
/// grants web access.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(default_query = %config.default_query, "initializing hnpane plugin");

    let mut state = AppState::new(config.default_query.clone(), config.load_theme());
    state.sort_key = config.default_sort;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = Config::from_zellij(&map(&[("base_url", "http://localhost:8080/api/")]));
        assert_eq!(config.base_url, "http://localhost:8080/api");

        let config = Config::from_zellij(&map(&[("base_url", "  ")]));
        assert_eq!(config.base_url, fetch::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_sort_falls_back() {
        let config = Config::from_zellij(&map(&[("default_sort", "karma")]));
        assert_eq!(config.default_sort, SortKey::None);
    }

    #[test]
    fn test_empty_default_query_is_kept() {
        let config = Config::from_zellij(&map(&[("default_query", "")]));
        assert_eq!(config.default_query, "");
    }

    #[test]
    fn test_blank_open_command_falls_back() {
        let config = Config::from_zellij(&map(&[("open_command", " ")]));
        assert_eq!(config.open_command, DEFAULT_OPEN_COMMAND);

        let config = Config::from_zellij(&map(&[("open_command", "open")]));
        assert_eq!(config.open_command, "open");
    }

    #[test]
    fn test_initialize_applies_config() {
        let config = Config {
            default_query: "rust".to_string(),
            default_sort: SortKey::Comments,
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.search_term, "rust");
        assert_eq!(state.sort_key, SortKey::Comments);
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert!(!state.is_loading);
        assert!(state.results.is_none());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme(), Theme::default());

        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme(), Theme::default());
    }
}
