//! Hits table: TITLE, AUTHOR, COMMENTS, POINTS and AGE columns.
//!
//! TITLE takes whatever width the fixed columns leave over. Numeric columns
//! and AGE are right-aligned.

use crate::app::state::{AppState, AGE_COLUMN_WIDTH, AUTHOR_COLUMN_WIDTH, NUMBER_COLUMN_WIDTH};
use crate::app::SortKey;
use crate::ui::helpers::{self, pad_left, pad_right, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the column headings, marking the active sort column.
pub fn render_table_headers(row: usize, sort_key: SortKey, theme: &Theme, cols: usize) -> usize {
    let title_width = AppState::title_column_width(cols);
    let heading = |label: &str, key: SortKey| {
        if key == sort_key && key != SortKey::None {
            format!("{label}*")
        } else {
            label.to_string()
        }
    };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad_right(&heading("TITLE", SortKey::Title), title_width));
    print!("{}", pad_right(&heading("AUTHOR", SortKey::Author), AUTHOR_COLUMN_WIDTH));
    print!("{}", pad_left(&heading("COMMENTS", SortKey::Comments), NUMBER_COLUMN_WIDTH));
    print!("{}", pad_left(&heading("POINTS", SortKey::Points), NUMBER_COLUMN_WIDTH));
    print!("{}", pad_left("AGE", AGE_COLUMN_WIDTH));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every row, returning the row after the last one.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let title_width = AppState::title_column_width(cols);
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols, title_width);
    }
    current_row
}

/// Renders one hit. Selected rows fill the whole width with the selection
/// background; filter matches are highlighted on the other rows.
fn render_table_row(
    row: usize,
    item: &DisplayItem,
    theme: &Theme,
    cols: usize,
    title_width: usize,
) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    print!(
        "{}",
        helpers::highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected, &base)
    );
    print!("{}", " ".repeat(title_width.saturating_sub(item.title.chars().count())));

    print!("{}", pad_right(&item.author, AUTHOR_COLUMN_WIDTH));
    print!("{}", pad_left(&item.comments, NUMBER_COLUMN_WIDTH));
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.accent));
    }
    print!("{}", pad_left(&item.points, NUMBER_COLUMN_WIDTH));
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", pad_left(&item.age, AGE_COLUMN_WIDTH));

    let line_len = title_width + AUTHOR_COLUMN_WIDTH + NUMBER_COLUMN_WIDTH * 2 + AGE_COLUMN_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
