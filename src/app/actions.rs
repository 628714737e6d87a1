//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin runtime executes them in order. Actions are the boundary between
//! pure state transitions and effectful operations such as web requests.
//!
//! # Example
//!
//! ```rust
//! use hnpane::app::Action;
//! use hnpane::fetch::FetchRequest;
//!
//! let actions = vec![Action::Fetch(FetchRequest::new("rust", 0))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::fetch::FetchRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Starts a search request through the runtime's
    /// [`Fetcher`](crate::fetch::Fetcher).
    ///
    /// The outcome comes back later as
    /// [`Event::FetchCompleted`](crate::app::Event::FetchCompleted).
    Fetch(FetchRequest),

    /// Opens a link with the configured opener command.
    OpenUrl {
        /// Link to open.
        url: String,
    },
}
