//! Error types for the hnpane plugin.
//!
//! This module defines the crate-wide error type [`HnPaneError`], the
//! [`FetchFailure`] kind recorded when a search request does not produce a
//! usable page, and a [`Result`] alias. All errors are implemented with
//! `thiserror`.

use thiserror::Error;

/// A search request that did not produce a usable page of results.
///
/// The controller treats every variant the same way: the value is stored in
/// the query state and the loading flag is cleared. The variants only shape
/// the diagnostic message shown to the user and written to traces.
///
/// # Examples
///
/// ```
/// use hnpane::domain::FetchFailure;
///
/// let failure = FetchFailure::Status(503);
/// assert_eq!(failure.to_string(), "search API responded with HTTP 503");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status code.
    #[error("search API responded with HTTP {0}")]
    Status(u16),

    /// The body could not be decoded into a page of hits.
    #[error("malformed search response: {0}")]
    Decode(String),
}

/// The main error type for hnpane operations.
///
/// Covers configuration and theme loading, trace file I/O and JSON handling.
/// Fetch failures are normally captured as state by the controller, but they
/// convert into this type for callers that want to propagate them with `?`.
#[derive(Debug, Error)]
pub enum HnPaneError {
    /// Configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A search request failed.
    #[error(transparent)]
    Fetch(#[from] FetchFailure),
}

/// A specialized `Result` type for hnpane operations.
pub type Result<T> = std::result::Result<T, HnPaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_messages() {
        assert_eq!(
            FetchFailure::Transport("connection reset".to_string()).to_string(),
            "request failed: connection reset"
        );
        assert_eq!(
            FetchFailure::Decode("missing field `hits`".to_string()).to_string(),
            "malformed search response: missing field `hits`"
        );
    }

    #[test]
    fn test_fetch_failure_converts_transparently() {
        let err: HnPaneError = FetchFailure::Status(500).into();
        assert_eq!(err.to_string(), "search API responded with HTTP 500");
    }
}
