//! Network capability for search requests.
//!
//! The application layer never performs I/O itself. It emits
//! [`Action::Fetch`](crate::app::Action::Fetch) and the plugin runtime hands
//! the request to a [`Fetcher`]. Completions arrive later as a separate event,
//! decoded with [`decode_response`].
//!
//! # Modules
//!
//! - `request`: Request model, URL construction and context map encoding
//! - `response`: Status/body decoding into pages or failures
//! - `trace`: Trace context propagation across the request boundary

pub mod request;
pub mod response;
pub mod trace;

pub use request::{FetchRequest, DEFAULT_BASE_URL};
pub use response::decode_response;
pub use trace::TraceContext;

/// Issues search requests without waiting for them.
///
/// Implementations start the request and return immediately. The outcome is
/// delivered to the application as
/// [`Event::FetchCompleted`](crate::app::Event::FetchCompleted), in whatever
/// order responses arrive.
pub trait Fetcher {
    /// Starts fetching the given request.
    fn fetch(&mut self, request: &FetchRequest);
}
