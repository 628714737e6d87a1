//! Component renderers.
//!
//! Each component prints its part of the screen at a given row and returns
//! the next free row.
//!
//! # Components
//!
//! - `header`: Title bar with term, counts and sort
//! - `input`: Search/filter input box
//! - `table`: Hits table
//! - `status`: Loading, failure and empty panels
//! - `footer`: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Input box, 3 lines, while editing]
//! [Table headings]      or  [Status panel]
//! [Table rows]
//! [Border]
//! [Footer]
//! ```

mod footer;
mod header;
mod input;
mod status;
mod table;

use crate::app::SortKey;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use header::render_header;
use input::render_input_bar;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Rows between the top chrome and a status panel.
const STATUS_PANEL_OFFSET: usize = 2;

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole screen for one frame.
pub fn render_layout(vm: &UIViewModel, sort_key: SortKey, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(input) = &vm.input_bar {
        current_row = render_input_bar(current_row, input, theme, cols);
    }

    if let Some(panel) = &vm.status {
        render_status(current_row + STATUS_PANEL_OFFSET, panel, theme, cols);
    } else {
        current_row = render_table_headers(current_row, sort_key, theme, cols);
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    render_border(footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
