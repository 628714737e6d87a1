//! Input mode and sort key types for the application.
//!
//! These enums control how keystrokes are interpreted and how the visible
//! list is ordered.
//!
//! # State Machine
//!
//! The application operates in one of two input modes:
//! - **Normal**: navigation and commands
//! - **Editing**: keystrokes go to the search term buffer or the live filter
//!
//! # Example
//!
//! ```rust
//! use hnpane::app::modes::{EditField, InputMode, SortKey};
//!
//! let mode = InputMode::Editing(EditField::Filter);
//! assert_eq!(SortKey::None.next(), SortKey::Title);
//! ```

use std::fmt;
use std::str::FromStr;

/// Field receiving keystrokes in editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    /// The search term. Committing submits a new search.
    Search,

    /// The local filter. Every keystroke updates the visible list.
    Filter,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), / (search), f (filter),
    /// s (sort), m (more), d (dismiss), enter (open), r (refresh), q (quit).
    Normal,

    /// Keystrokes edit the contained field.
    Editing(EditField),
}

/// Ordering applied to the accumulated hits before filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Arrival order.
    #[default]
    None,
    /// Ascending by title.
    Title,
    /// Ascending by author.
    Author,
    /// Descending by comment count.
    Comments,
    /// Descending by points.
    Points,
}

impl SortKey {
    /// Returns the next key in the cycle `None → Title → Author → Comments → Points → None`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Title,
            Self::Title => Self::Author,
            Self::Author => Self::Comments,
            Self::Comments => Self::Points,
            Self::Points => Self::None,
        }
    }

    /// Short label shown in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Title => "title",
            Self::Author => "author",
            Self::Comments => "comments",
            Self::Points => "points",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = crate::domain::HnPaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "comments" => Ok(Self::Comments),
            "points" => Ok(Self::Points),
            other => Err(crate::domain::HnPaneError::Config(format!(
                "unknown sort key '{other}'"
            ))),
        }
    }
}
