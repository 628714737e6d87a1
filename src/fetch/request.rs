//! Outgoing search requests.
//!
//! A [`FetchRequest`] names the term and page to fetch. It knows how to build
//! the endpoint URL and how to round-trip itself through the string map that
//! Zellij hands back with every web request result.

use super::trace::TraceContext;
use std::collections::BTreeMap;

/// Default Hacker News search API base.
pub const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1";

const PATH_SEARCH: &str = "/search";
const PARAM_SEARCH: &str = "query=";
const PARAM_PAGE: &str = "page=";

const CONTEXT_SOURCE: &str = "source";
const CONTEXT_TERM: &str = "term";
const CONTEXT_PAGE: &str = "page";
const CONTEXT_TRACE: &str = "trace";

/// Value of the `source` context entry marking requests issued by this plugin.
pub const SOURCE_TAG: &str = "hnpane";

/// A request for one page of hits for one search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub term: String,
    pub page: u32,
    /// Span that issued the request, if tracing is active.
    pub trace_context: Option<TraceContext>,
}

impl FetchRequest {
    /// Creates a request and captures the current trace context.
    #[must_use]
    pub fn new(term: impl Into<String>, page: u32) -> Self {
        Self {
            term: term.into(),
            page,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Builds `{base}/search?query={term}&page={page}`.
    ///
    /// The term is inserted verbatim, without URL encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use hnpane::fetch::FetchRequest;
    ///
    /// let request = FetchRequest::new("rust", 2);
    /// assert_eq!(
    ///     request.url("https://hn.algolia.com/api/v1"),
    ///     "https://hn.algolia.com/api/v1/search?query=rust&page=2"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!(
            "{base}{PATH_SEARCH}?{PARAM_SEARCH}{}&{PARAM_PAGE}{}",
            self.term, self.page
        )
    }

    /// Encodes the request into a web request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_SOURCE.to_string(), SOURCE_TAG.to_string());
        context.insert(CONTEXT_TERM.to_string(), self.term.clone());
        context.insert(CONTEXT_PAGE.to_string(), self.page.to_string());

        if let Some(trace) = &self.trace_context {
            match serde_json::to_string(trace) {
                Ok(json) => {
                    context.insert(CONTEXT_TRACE.to_string(), json);
                }
                Err(e) => tracing::debug!(error = %e, "failed to serialize trace context"),
            }
        }

        context
    }

    /// Decodes a request from a web request context map.
    ///
    /// Returns `None` for maps not produced by [`FetchRequest::to_context`].
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        if context.get(CONTEXT_SOURCE).map(String::as_str) != Some(SOURCE_TAG) {
            return None;
        }

        let term = context.get(CONTEXT_TERM)?.clone();
        let page = context.get(CONTEXT_PAGE)?.parse::<u32>().ok()?;
        let trace_context = context
            .get(CONTEXT_TRACE)
            .and_then(|json| serde_json::from_str(json).ok());

        Some(Self {
            term,
            page,
            trace_context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_keeps_term_verbatim() {
        let request = FetchRequest::new("tampa bay", 0);
        assert_eq!(
            request.url("http://localhost:8080"),
            "http://localhost:8080/search?query=tampa bay&page=0"
        );
    }

    #[test]
    fn test_context_round_trip_with_trace() {
        let request = FetchRequest {
            term: "rust".to_string(),
            page: 3,
            trace_context: Some(TraceContext {
                trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
                parent_span_id: "00f067aa0ba902b7".to_string(),
            }),
        };

        let context = request.to_context();
        assert_eq!(context.get("source").map(String::as_str), Some("hnpane"));
        assert_eq!(FetchRequest::from_context(&context), Some(request));
    }

    #[test]
    fn test_foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("term".to_string(), "rust".to_string());
        context.insert("page".to_string(), "0".to_string());
        assert_eq!(FetchRequest::from_context(&context), None);
    }

    #[test]
    fn test_context_with_bad_page_is_ignored() {
        let mut context = FetchRequest::new("rust", 0).to_context();
        context.insert("page".to_string(), "first".to_string());
        assert_eq!(FetchRequest::from_context(&context), None);
    }
}
