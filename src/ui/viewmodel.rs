//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready strings
//! and flags.

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Rows to display in the hits table.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Header information.
    pub header: HeaderInfo,

    /// Footer information.
    pub footer: FooterInfo,

    /// Input box shown while a field is being edited.
    pub input_bar: Option<InputBarInfo>,

    /// Panel shown in place of the table (loading, failure, nothing to show).
    pub status: Option<StatusPanel>,
}

/// Display information for a single hit.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Title, truncated to the column width.
    pub title: String,

    /// Author, truncated to the column width.
    pub author: String,

    /// Comment count.
    pub comments: String,

    /// Points.
    pub points: String,

    /// Relative age ("3h ago").
    pub age: String,

    /// Whether this row is selected.
    pub is_selected: bool,

    /// Character ranges of the title matching the filter term.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Input box display information.
#[derive(Debug, Clone)]
pub struct InputBarInfo {
    /// Field label ("Search", "Filter").
    pub label: String,

    /// Current text of the field.
    pub text: String,
}

/// What a status panel is reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
    Empty,
}

/// Message panel displayed instead of the table.
#[derive(Debug, Clone)]
pub struct StatusPanel {
    pub kind: StatusKind,

    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

impl StatusPanel {
    #[must_use]
    pub fn loading(message: &str, subtitle: &str) -> Self {
        Self::new(StatusKind::Loading, message, subtitle)
    }

    #[must_use]
    pub fn error(message: &str, subtitle: &str) -> Self {
        Self::new(StatusKind::Error, message, subtitle)
    }

    #[must_use]
    pub fn empty(message: &str, subtitle: &str) -> Self {
        Self::new(StatusKind::Empty, message, subtitle)
    }

    fn new(kind: StatusKind, message: &str, subtitle: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        }
    }
}
