//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single transition function of the application: it
//! takes the current state and one event, mutates the state, and returns
//! whether to re-render plus the side effects to run.
//!
//! # Fetch lifecycle
//!
//! ```text
//! SubmitQuery / RequestMore ──► is_loading = true, Action::Fetch
//!                                     │
//!          FetchCompleted(Ok) ◄───────┴───────► FetchCompleted(Err)
//!   merge page, clear error,                   record error,
//!   is_loading = false                         is_loading = false
//! ```
//!
//! Requests are not tracked or cancelled. If several are in flight their
//! pages are merged in the order the responses arrive.
//!
//! # Event Types
//!
//! - **Query**: `SubmitQuery`, `RequestMore`, `Resubmit`, `FetchCompleted`
//! - **Local view**: `ChangeFilter`, `ClearFilter`, `ChangeSort`, `CycleSort`, `ResetSort`
//! - **Dismissal**: `Dismiss`, `DismissSelected`
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenSelected`, `CloseFocus`
//! - **Editing**: `EditSearch`, `EditFilter`, `Char`, `Backspace`, `CommitEdit`, `CancelEdit`
//!
//! # Example
//!
//! ```rust
//! use hnpane::app::{handle_event, Action, AppState, Event};
//! use hnpane::ui::Theme;
//!
//! let mut state = AppState::new("", Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::SubmitQuery { term: "rust".into() })?;
//! assert!(state.is_loading);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), hnpane::HnPaneError>(())
//! ```

use super::modes::{EditField, InputMode, SortKey};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{FetchFailure, SearchResult};
use crate::fetch::FetchRequest;
use crate::store::merge;

/// Events triggered by user input or request completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Submits a new search. The next merge replaces all accumulated hits.
    SubmitQuery {
        /// Term to search for.
        term: String,
    },
    /// Requests the page after the last merged one for the current term.
    RequestMore,
    /// Submits the current search term again.
    Resubmit,

    /// A search request finished.
    FetchCompleted {
        /// The request this completes, when the runtime could recover it.
        request: Option<FetchRequest>,
        /// The decoded page or the failure.
        outcome: std::result::Result<SearchResult, FetchFailure>,
    },

    /// Replaces the live filter term.
    ChangeFilter {
        /// New filter term.
        term: String,
    },
    /// Clears the live filter term.
    ClearFilter,
    /// Replaces the sort key.
    ChangeSort {
        /// New sort key.
        key: SortKey,
    },
    /// Advances to the next sort key.
    CycleSort,
    /// Restores arrival order.
    ResetSort,

    /// Removes every accumulated hit with this identifier.
    Dismiss {
        /// Identifier of the hit to remove.
        object_id: String,
    },
    /// Removes the selected hit.
    DismissSelected,

    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Opens the selected hit's link.
    OpenSelected,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Starts editing the search term.
    EditSearch,
    /// Starts editing the filter term.
    EditFilter,
    /// Appends a character to the field being edited.
    Char(char),
    /// Removes the last character from the field being edited.
    Backspace,
    /// Leaves editing mode, submitting the search term if it was being edited.
    CommitEdit,
    /// Leaves editing mode, discarding an edited search term.
    CancelEdit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions must be executed in order.
///
/// # Errors
///
/// Reserved for transitions that cannot be applied; every current event is
/// handled infallibly and fetch failures are recorded as state instead.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let span = tracing::debug_span!("handle_event", event_type = ?EventName(event));
    if let Event::FetchCompleted {
        request: Some(FetchRequest {
            trace_context: Some(parent),
            ..
        }),
        ..
    } = event
    {
        parent.set_parent_of(&span);
    }
    let _span = span.entered();

    match event {
        Event::SubmitQuery { term } => Ok((true, submit_query(state, term.clone()))),
        Event::Resubmit => {
            let term = state.search_term.clone();
            Ok((true, submit_query(state, term)))
        }
        Event::RequestMore => Ok((true, request_more(state))),
        Event::FetchCompleted { request, outcome } => {
            complete_fetch(state, request.as_ref(), outcome);
            Ok((true, vec![]))
        }
        Event::ChangeFilter { term } => {
            state.filter_term.clone_from(term);
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::ClearFilter => {
            if state.filter_term.is_empty() {
                return Ok((false, vec![]));
            }
            state.filter_term.clear();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::ChangeSort { key } => {
            tracing::debug!(sort_key = %key, "sort key changed");
            state.sort_key = *key;
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::CycleSort => {
            let key = state.sort_key.next();
            handle_event(state, &Event::ChangeSort { key })
        }
        Event::ResetSort => {
            if state.sort_key == SortKey::None {
                return Ok((false, vec![]));
            }
            handle_event(state, &Event::ChangeSort { key: SortKey::None })
        }
        Event::Dismiss { object_id } => {
            let Some(results) = &state.results else {
                tracing::debug!(object_id = %object_id, "nothing to dismiss");
                return Ok((false, vec![]));
            };

            let updated = results.dismiss(object_id);
            let removed = results.hits.len() - updated.hits.len();
            tracing::debug!(object_id = %object_id, removed = removed, "dismissed hit");

            state.results = Some(updated);
            state.clamp_selection();
            Ok((removed > 0, vec![]))
        }
        Event::DismissSelected => {
            let Some(object_id) = state.selected_item().map(|item| item.object_id.clone()) else {
                tracing::debug!("no hit selected to dismiss");
                return Ok((false, vec![]));
            };
            handle_event(state, &Event::Dismiss { object_id })
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => Ok(state.selected_item().map_or_else(
            || (false, vec![]),
            |item| (false, vec![Action::OpenUrl { url: item.link() }]),
        )),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::EditSearch => {
            state.input_mode = InputMode::Editing(EditField::Search);
            state.edit_buffer.clone_from(&state.search_term);
            Ok((true, vec![]))
        }
        Event::EditFilter => {
            state.input_mode = InputMode::Editing(EditField::Filter);
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Normal => Ok((false, vec![])),
            InputMode::Editing(EditField::Search) => {
                state.edit_buffer.push(*c);
                Ok((true, vec![]))
            }
            InputMode::Editing(EditField::Filter) => {
                state.filter_term.push(*c);
                tracing::trace!(filter = %state.filter_term, "filter term updated");
                state.clamp_selection();
                Ok((true, vec![]))
            }
        },
        Event::Backspace => match state.input_mode {
            InputMode::Normal => Ok((false, vec![])),
            InputMode::Editing(EditField::Search) => {
                state.edit_buffer.pop();
                Ok((true, vec![]))
            }
            InputMode::Editing(EditField::Filter) => {
                state.filter_term.pop();
                state.clamp_selection();
                Ok((true, vec![]))
            }
        },
        Event::CommitEdit => match state.input_mode {
            InputMode::Normal => Ok((false, vec![])),
            InputMode::Editing(EditField::Search) => {
                state.input_mode = InputMode::Normal;
                let term = std::mem::take(&mut state.edit_buffer);
                Ok((true, submit_query(state, term)))
            }
            InputMode::Editing(EditField::Filter) => {
                state.input_mode = InputMode::Normal;
                Ok((true, vec![]))
            }
        },
        Event::CancelEdit => match state.input_mode {
            InputMode::Normal => Ok((false, vec![])),
            InputMode::Editing(field) => {
                state.input_mode = InputMode::Normal;
                if field == EditField::Search {
                    state.edit_buffer.clear();
                }
                Ok((true, vec![]))
            }
        },
    }
}

/// `submitQuery`: records the term, raises the loading flag and fetches page 0.
fn submit_query(state: &mut AppState, term: String) -> Vec<Action> {
    tracing::debug!(term = %term, "submitting search");
    state.search_term = term;
    state.is_loading = true;
    state.in_flight += 1;
    vec![Action::Fetch(FetchRequest::new(state.search_term.clone(), 0))]
}

/// `requestMore`: fetches the page after the last merged one.
fn request_more(state: &mut AppState) -> Vec<Action> {
    let page = state.next_page();
    tracing::debug!(term = %state.search_term, page = page, in_flight = state.in_flight, "requesting more hits");
    state.is_loading = true;
    state.in_flight += 1;
    vec![Action::Fetch(FetchRequest::new(state.search_term.clone(), page))]
}

fn complete_fetch(
    state: &mut AppState,
    request: Option<&FetchRequest>,
    outcome: &std::result::Result<SearchResult, FetchFailure>,
) {
    state.in_flight = state.in_flight.saturating_sub(1);
    state.is_loading = false;

    match outcome {
        Ok(result) => {
            tracing::debug!(
                page = result.page,
                hit_count = result.hits.len(),
                requested_page = ?request.map(|r| r.page),
                in_flight = state.in_flight,
                "search page received"
            );
            if result.page == 0 {
                state.selected_index = 0;
            }
            state.results = Some(merge(state.results.take(), result.clone()));
            state.total_pages = result.nb_pages;
            state.error = None;
            state.clamp_selection();
        }
        Err(failure) => {
            tracing::warn!(
                error = %failure,
                requested_page = ?request.map(|r| r.page),
                "search request failed"
            );
            state.error = Some(failure.clone());
        }
    }
}

/// Span label that omits event payloads (whole pages of hits).
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::FetchCompleted { outcome, .. } => match outcome {
                Ok(result) => write!(f, "FetchCompleted(page {})", result.page),
                Err(_) => f.write_str("FetchCompleted(failure)"),
            },
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use crate::ui::Theme;

    fn page(ids: &[&str], page: u32) -> SearchResult {
        SearchResult {
            hits: ids.iter().map(|id| Item::new(*id, Some(id))).collect(),
            page,
            nb_pages: None,
        }
    }

    fn completed(result: SearchResult) -> Event {
        Event::FetchCompleted {
            request: None,
            outcome: Ok(result),
        }
    }

    fn failed() -> Event {
        Event::FetchCompleted {
            request: None,
            outcome: Err(FetchFailure::Transport("connection refused".to_string())),
        }
    }

    fn fetched(actions: &[Action]) -> Vec<(String, u32)> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Fetch(request) => Some((request.term.clone(), request.page)),
                _ => None,
            })
            .collect()
    }

    fn ids(state: &AppState) -> Vec<String> {
        state
            .results
            .as_ref()
            .map(|r| r.hits.iter().map(|item| item.object_id.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_submit_sets_loading_and_fetches_page_zero() {
        let mut state = AppState::new("", Theme::default());
        let (render, actions) = handle_event(
            &mut state,
            &Event::SubmitQuery {
                term: "tampa".to_string(),
            },
        )
        .unwrap();

        assert!(render);
        assert!(state.is_loading);
        assert_eq!(state.search_term, "tampa");
        assert_eq!(fetched(&actions), vec![("tampa".to_string(), 0)]);
    }

    #[test]
    fn test_success_clears_loading_and_merges() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &Event::Resubmit).unwrap();
        handle_event(&mut state, &completed(page(&["a", "b"], 0))).unwrap();

        assert!(!state.is_loading);
        assert_eq!(ids(&state), vec!["a", "b"]);
        assert_eq!(state.in_flight, 0);
    }

    #[test]
    fn test_failure_clears_loading_and_keeps_hits() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &completed(page(&["a", "b"], 0))).unwrap();

        handle_event(&mut state, &Event::RequestMore).unwrap();
        assert!(state.is_loading);
        handle_event(&mut state, &failed()).unwrap();

        assert!(!state.is_loading);
        assert!(state.error.is_some());
        assert_eq!(ids(&state), vec!["a", "b"]);
    }

    #[test]
    fn test_success_after_failure_clears_error() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &failed()).unwrap();
        assert!(state.error.is_some());

        handle_event(&mut state, &Event::Resubmit).unwrap();
        handle_event(&mut state, &completed(page(&["x"], 0))).unwrap();
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_request_more_without_results_fetches_page_zero() {
        let mut state = AppState::new("tampa", Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::RequestMore).unwrap();
        assert_eq!(fetched(&actions), vec![("tampa".to_string(), 0)]);
    }

    #[test]
    fn test_request_more_fetches_next_page_for_current_term() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &completed(page(&["a"], 0))).unwrap();
        handle_event(&mut state, &completed(page(&["b"], 1))).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::RequestMore).unwrap();
        assert_eq!(fetched(&actions), vec![("tampa".to_string(), 2)]);
    }

    #[test]
    fn test_filter_and_sort_issue_no_fetch() {
        let mut state = AppState::new("tampa", Theme::default());
        let (_, actions) = handle_event(
            &mut state,
            &Event::ChangeFilter {
                term: "bay".to_string(),
            },
        )
        .unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.filter_term, "bay");

        let (_, actions) = handle_event(
            &mut state,
            &Event::ChangeSort {
                key: SortKey::Points,
            },
        )
        .unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.sort_key, SortKey::Points);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_dismiss_removes_hit() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &completed(page(&["1", "2", "3"], 0))).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::Dismiss {
                object_id: "2".to_string(),
            },
        )
        .unwrap();
        assert!(render);
        assert_eq!(ids(&state), vec!["1", "3"]);

        let (render, _) = handle_event(
            &mut state,
            &Event::Dismiss {
                object_id: "9".to_string(),
            },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(ids(&state), vec!["1", "3"]);
    }

    #[test]
    fn test_dismiss_selected_uses_visible_order() {
        let mut state = AppState::new("tampa", Theme::default());
        let mut result = page(&["low", "high"], 0);
        result.hits[1].points = 100;
        handle_event(&mut state, &completed(result)).unwrap();
        handle_event(&mut state, &Event::ChangeSort { key: SortKey::Points }).unwrap();

        handle_event(&mut state, &Event::DismissSelected).unwrap();
        assert_eq!(ids(&state), vec!["low"]);
    }

    #[test]
    fn test_edit_search_commit_submits() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &Event::EditSearch).unwrap();
        assert_eq!(state.edit_buffer, "tampa");

        for _ in 0.."tampa".len() {
            handle_event(&mut state, &Event::Backspace).unwrap();
        }
        for c in "rust".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        let (_, actions) = handle_event(&mut state, &Event::CommitEdit).unwrap();

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.search_term, "rust");
        assert_eq!(fetched(&actions), vec![("rust".to_string(), 0)]);
    }

    #[test]
    fn test_edit_search_cancel_discards() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &Event::EditSearch).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::CancelEdit).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.search_term, "tampa");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_edit_filter_is_live() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &completed(page(&["rust", "go"], 0))).unwrap();
        handle_event(&mut state, &Event::EditFilter).unwrap();
        handle_event(&mut state, &Event::Char('g')).unwrap();

        assert_eq!(state.visible_hits().len(), 1);

        handle_event(&mut state, &Event::CancelEdit).unwrap();
        assert_eq!(state.filter_term, "g");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_chars_ignored_in_normal_mode() {
        let mut state = AppState::new("tampa", Theme::default());
        let (render, _) = handle_event(&mut state, &Event::Char('z')).unwrap();
        assert!(!render);
        assert!(state.filter_term.is_empty());
    }

    #[test]
    fn test_open_selected_emits_link() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &completed(page(&["7"], 0))).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert_eq!(
            actions,
            vec![Action::OpenUrl {
                url: "https://news.ycombinator.com/item?id=7".to_string()
            }]
        );
    }

    #[test]
    fn test_cycle_sort() {
        let mut state = AppState::new("tampa", Theme::default());
        handle_event(&mut state, &Event::CycleSort).unwrap();
        assert_eq!(state.sort_key, SortKey::Title);

        let (render, _) = handle_event(&mut state, &Event::ResetSort).unwrap();
        assert!(render);
        assert_eq!(state.sort_key, SortKey::None);

        let (render, _) = handle_event(&mut state, &Event::ResetSort).unwrap();
        assert!(!render);
    }
}
