//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single state record owned by the
//! plugin. It holds the query state (search term, filter term, sort key,
//! loading flag, last failure), the accumulated results, and the transient UI
//! state (selection, input mode, edit buffer).
//!
//! # State Components
//!
//! - **Query state**: what the user asked for and how the last request went
//! - **Results**: hits accumulated across pages, `None` until the first page
//! - **Selection**: cursor position within the visible (derived) list
//! - **Input mode**: whether keystrokes navigate or edit a field
//!
//! The visible list is not stored; [`AppState::visible_hits`] derives it on
//! demand.
//!
//! # Example
//!
//! ```rust
//! use hnpane::app::AppState;
//! use hnpane::ui::Theme;
//!
//! let state = AppState::new("rust", Theme::default());
//! assert!(state.visible_hits().is_empty());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.status.is_some());
//! ```

use super::modes::{EditField, InputMode, SortKey};
use super::view::{derive, match_ranges};
use crate::domain::{FetchFailure, Item};
use crate::store::ResultState;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, FooterInfo, HeaderInfo, InputBarInfo, StatusPanel, UIViewModel,
};

/// Fixed width of the AUTHOR column.
pub const AUTHOR_COLUMN_WIDTH: usize = 16;

/// Fixed width of each numeric column (COMMENTS, POINTS).
pub const NUMBER_COLUMN_WIDTH: usize = 9;

/// Fixed width of the AGE column.
pub const AGE_COLUMN_WIDTH: usize = 9;

/// Minimum width of the TITLE column.
const MIN_TITLE_WIDTH: usize = 10;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Last submitted search term.
    pub search_term: String,

    /// Live local filter applied to titles. Never triggers a request.
    pub filter_term: String,

    /// Ordering applied before filtering.
    pub sort_key: SortKey,

    /// Set when a request is issued, cleared by every completion.
    pub is_loading: bool,

    /// Last fetch failure, cleared by the next successful completion.
    pub error: Option<FetchFailure>,

    /// Hits accumulated for the current search term.
    pub results: Option<ResultState>,

    /// Page count reported with the last merged page, if any.
    pub total_pages: Option<u32>,

    /// Number of requests issued and not yet completed. Informational only.
    pub in_flight: usize,

    /// Zero-based index of the selected row within the visible list.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Pending search term while the search field is being edited.
    pub edit_buffer: String,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a state with no results and the given initial search term.
    #[must_use]
    pub fn new(search_term: impl Into<String>, theme: Theme) -> Self {
        Self {
            search_term: search_term.into(),
            filter_term: String::new(),
            sort_key: SortKey::None,
            is_loading: false,
            error: None,
            results: None,
            total_pages: None,
            in_flight: 0,
            selected_index: 0,
            input_mode: InputMode::Normal,
            edit_buffer: String::new(),
            theme,
        }
    }

    /// Returns the hits to display, sorted then filtered.
    #[must_use]
    pub fn visible_hits(&self) -> Vec<&Item> {
        self.results.as_ref().map_or_else(Vec::new, |results| {
            derive(&results.hits, self.sort_key, &self.filter_term)
        })
    }

    /// Number of accumulated hits, before filtering.
    #[must_use]
    pub fn total_hits(&self) -> usize {
        self.results.as_ref().map_or(0, |results| results.hits.len())
    }

    /// Page index that "load more" requests: one past the last merged page,
    /// or 0 when nothing has been merged yet.
    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.results.as_ref().map_or(0, ResultState::next_page)
    }

    /// Returns the selected visible hit, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.visible_hits().get(self.selected_index).copied()
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_hits().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_hits().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Keeps the selection inside the visible list after it changed.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_hits().len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// When a status panel is present (loading, failure, nothing to show) it
    /// replaces the table; `display_items` is then empty.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome
    /// 2. Center window around selected index
    /// 3. Adjust window if near the end to maximize visible items
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let visible = self.visible_hits();

        let mut viewmodel = UIViewModel {
            display_items: vec![],
            selected_index: 0,
            header: self.compute_header(visible.len()),
            footer: self.compute_footer(),
            input_bar: self.compute_input_bar(),
            status: self.compute_status(visible.len()),
        };

        if viewmodel.status.is_some() {
            return viewmodel;
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(visible.len());

        if visible_end - visible_start < available_rows && visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let title_width = Self::title_column_width(cols);

        viewmodel.display_items = visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, item)| {
                let is_selected = visible_start + relative_idx == self.selected_index;
                self.compute_display_item(item, is_selected, title_width)
            })
            .collect();
        viewmodel.selected_index = self.selected_index.saturating_sub(visible_start);

        viewmodel
    }

    /// Width left for the TITLE column once the fixed columns are placed.
    #[must_use]
    pub fn title_column_width(cols: usize) -> usize {
        cols.saturating_sub(AUTHOR_COLUMN_WIDTH + NUMBER_COLUMN_WIDTH * 2 + AGE_COLUMN_WIDTH)
            .max(MIN_TITLE_WIDTH)
    }

    fn compute_display_item(&self, item: &Item, is_selected: bool, title_width: usize) -> DisplayItem {
        let full_title = item.title.as_deref().map(printable).unwrap_or_default();
        let title = truncate(&full_title, title_width.saturating_sub(2));

        let title_len = title.chars().count();
        let highlight_ranges = match_ranges(&full_title, &self.filter_term)
            .into_iter()
            .filter(|&(_, end)| end <= title_len)
            .collect();

        DisplayItem {
            title,
            author: truncate(&printable(&item.author), AUTHOR_COLUMN_WIDTH - 2),
            comments: item.num_comments.to_string(),
            points: item.points.to_string(),
            age: item.time_ago(),
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_header(&self, visible_count: usize) -> HeaderInfo {
        let mut title = format!(
            " HN: {}  ({visible_count}/{})  sort: {} ",
            self.search_term,
            self.total_hits(),
            self.sort_key
        );
        if let (Some(results), Some(total)) = (&self.results, self.total_pages) {
            let page = results.page.saturating_add(1);
            title.push_str(&format!(" page: {page}/{total} "));
        }
        if !self.filter_term.is_empty() {
            title.push_str(&format!(" filter: {} ", self.filter_term));
        }
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Editing(EditField::Search) => {
                "Enter: search  ESC: cancel  Type to edit the query".to_string()
            }
            InputMode::Editing(EditField::Filter) => {
                "Enter/ESC: done  Type to filter titles".to_string()
            }
            InputMode::Normal => {
                let more = if self.is_loading { "loading..." } else { "m: more" };
                format!("j/k: navigate  /: search  f: filter  s: sort  {more}  d: dismiss  Enter: open  q: quit")
            }
        };

        FooterInfo { keybindings }
    }

    fn compute_input_bar(&self) -> Option<InputBarInfo> {
        match self.input_mode {
            InputMode::Normal => None,
            InputMode::Editing(EditField::Search) => Some(InputBarInfo {
                label: "Search".to_string(),
                text: self.edit_buffer.clone(),
            }),
            InputMode::Editing(EditField::Filter) => Some(InputBarInfo {
                label: "Filter".to_string(),
                text: self.filter_term.clone(),
            }),
        }
    }

    fn compute_status(&self, visible_count: usize) -> Option<StatusPanel> {
        if self.is_loading {
            return (visible_count == 0).then(|| {
                StatusPanel::loading("Searching Hacker News...", &self.search_term)
            });
        }

        if let Some(error) = &self.error {
            return Some(StatusPanel::error(
                "Something went wrong.",
                &error.to_string(),
            ));
        }

        if visible_count > 0 {
            return None;
        }

        if self.results.is_none() {
            Some(StatusPanel::empty("No search yet", "Press / to search"))
        } else if self.filter_term.is_empty() {
            Some(StatusPanel::empty("No results", "Try another search term"))
        } else {
            Some(StatusPanel::empty(
                "No hits match the filter",
                &format!("filter: {}", self.filter_term),
            ))
        }
    }

    /// Accounts for header (3 rows), footer (2 rows), column headers (1 row)
    /// and the input box (3 rows) while editing.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(6),
            InputMode::Editing(_) => total_rows.saturating_sub(9),
        }
    }
}

/// Truncates to `max_chars` characters, marking the cut with "...".
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// Drops control characters so API text cannot inject terminal escapes.
fn printable(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::StatusKind;

    fn state_with(titles: &[Option<&str>]) -> AppState {
        let mut state = AppState::new("tampa", Theme::default());
        state.results = Some(ResultState {
            hits: titles
                .iter()
                .enumerate()
                .map(|(idx, title)| Item::new(idx.to_string(), *title))
                .collect(),
            page: 0,
        });
        state
    }

    #[test]
    fn test_next_page_without_results_is_zero() {
        let state = AppState::new("tampa", Theme::default());
        assert_eq!(state.next_page(), 0);
    }

    #[test]
    fn test_next_page_follows_last_merged_page() {
        let mut state = state_with(&[Some("a")]);
        if let Some(results) = state.results.as_mut() {
            results.page = 2;
        }
        assert_eq!(state.next_page(), 3);
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = state_with(&[Some("a"), Some("b"), Some("c")]);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_selection_skips_titleless_rows() {
        let mut state = state_with(&[Some("a"), None, Some("c")]);
        state.move_selection_down();
        assert_eq!(state.selected_item().map(|item| item.object_id.as_str()), Some("2"));
    }

    #[test]
    fn test_clamp_selection_after_filter() {
        let mut state = state_with(&[Some("rust"), Some("go"), Some("zig")]);
        state.selected_index = 2;
        state.filter_term = "rust".to_string();
        state.clamp_selection();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_viewmodel_status_precedence() {
        let mut state = AppState::new("tampa", Theme::default());
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.map(|s| s.kind), Some(StatusKind::Empty));

        state.is_loading = true;
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.map(|s| s.kind), Some(StatusKind::Loading));

        state.error = Some(FetchFailure::Status(500));
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.map(|s| s.kind), Some(StatusKind::Loading));

        state.is_loading = false;
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.map(|s| s.kind), Some(StatusKind::Error));
    }

    #[test]
    fn test_retry_after_failure_hides_stale_error() {
        let mut state = state_with(&[Some("a")]);
        state.error = Some(FetchFailure::Status(503));
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status.map(|s| s.kind), Some(StatusKind::Error));

        state.is_loading = true;
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.status.is_none());
        assert_eq!(vm.display_items.len(), 1);
    }

    #[test]
    fn test_display_strips_control_characters() {
        let mut state = state_with(&[Some("Tampa\u{1b}[2J Bay\n")]);
        if let Some(results) = state.results.as_mut() {
            results.hits[0].author = "pg\u{7}".to_string();
        }
        let vm = state.compute_viewmodel(24, 120);
        assert_eq!(vm.display_items[0].title, "Tampa[2J Bay");
        assert_eq!(vm.display_items[0].author, "pg");
    }

    #[test]
    fn test_viewmodel_keeps_rows_while_loading_more() {
        let mut state = state_with(&[Some("a"), Some("b")]);
        state.is_loading = true;
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.status.is_none());
        assert_eq!(vm.display_items.len(), 2);
        assert!(vm.footer.keybindings.contains("loading..."));
    }

    #[test]
    fn test_viewmodel_windows_around_selection() {
        let titles: Vec<Option<&str>> = vec![Some("hit"); 30];
        let mut state = state_with(&titles);
        state.selected_index = 20;
        let vm = state.compute_viewmodel(16, 100);
        assert_eq!(vm.display_items.len(), 10);
        assert!(vm.display_items[vm.selected_index].is_selected);
    }

    #[test]
    fn test_viewmodel_filter_highlight() {
        let mut state = state_with(&[Some("Tampa Bay")]);
        state.filter_term = "bay".to_string();
        let vm = state.compute_viewmodel(24, 100);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(6, 9)]);
    }

    #[test]
    fn test_header_shows_counts_and_pages() {
        let mut state = state_with(&[Some("a"), None]);
        state.total_pages = Some(50);
        let vm = state.compute_viewmodel(24, 100);
        assert!(vm.header.title.contains("(1/2)"));
        assert!(vm.header.title.contains("page: 1/50"));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("short", 8), "short");
    }
}
