//! Accumulated result set and the page merge policy.
//!
//! [`merge`] is a pure state transition: it performs no I/O and cannot fail.
//! A page with index 0 replaces everything accumulated so far; any other page
//! is appended in arrival order. The controller relies on new searches always
//! requesting page 0 to discard stale hits.

use crate::domain::{Item, SearchResult};

/// Hits accumulated across every page merged for the current search term.
///
/// `hits` keeps insertion order. `page` is the index of the last page merged,
/// which is what "load more" increments. No uniqueness is enforced on
/// `object_id`: a page that repeats an earlier hit produces a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultState {
    pub hits: Vec<Item>,
    pub page: u32,
}

impl ResultState {
    /// Removes every hit with the given identifier, leaving `page` untouched.
    #[must_use]
    pub fn dismiss(&self, object_id: &str) -> Self {
        Self {
            hits: super::dismiss::dismiss(&self.hits, object_id),
            page: self.page,
        }
    }

    /// Returns the page index that "load more" should request next.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.page.saturating_add(1)
    }
}

/// Merges an incoming page into the accumulated state.
///
/// - `incoming.page == 0`: the result is exactly the incoming hits at page 0.
/// - otherwise: `existing.hits ++ incoming.hits` at `incoming.page`.
///
/// No deduplication by `object_id` is performed.
///
/// # Example
///
/// ```
/// use hnpane::domain::{Item, SearchResult};
/// use hnpane::store::merge;
///
/// let first = merge(None, SearchResult { hits: vec![Item::new("a", None)], page: 0, nb_pages: None });
/// let second = merge(Some(first), SearchResult { hits: vec![Item::new("b", None)], page: 1, nb_pages: None });
/// assert_eq!(second.hits.len(), 2);
/// assert_eq!(second.page, 1);
/// ```
#[must_use]
pub fn merge(existing: Option<ResultState>, incoming: SearchResult) -> ResultState {
    let SearchResult { hits, page, .. } = incoming;

    if page == 0 {
        tracing::debug!(hit_count = hits.len(), "replacing accumulated results");
        return ResultState { hits, page };
    }

    let mut accumulated = existing.map(|state| state.hits).unwrap_or_default();
    tracing::debug!(
        existing_count = accumulated.len(),
        incoming_count = hits.len(),
        page = page,
        "appending page to accumulated results"
    );
    accumulated.extend(hits);

    ResultState {
        hits: accumulated,
        page,
    }
}
