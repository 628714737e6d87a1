//! Input box for the search and filter fields.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBarInfo;

/// Horizontal margin around the box.
const INPUT_BOX_MARGIN: usize = 5;

/// Renders a 3-line framed box:
///
/// ```text
/// ┌────────────────────┐
/// │ Search: tampa█     │
/// └────────────────────┘
/// ```
///
/// Long text is scrolled so its end (where typing happens) stays visible.
/// Returns the row after the box.
pub fn render_input_bar(row: usize, input: &InputBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.input_border);
    let margin = " ".repeat(INPUT_BOX_MARGIN);

    position_cursor(row, 1);
    print!("{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    let prefix = format!(" {}: ", input.label);
    let room = inner_width.saturating_sub(prefix.chars().count() + 1);
    let text_len = input.text.chars().count();
    let shown: String = input.text.chars().skip(text_len.saturating_sub(room)).collect();
    let used = prefix.chars().count() + shown.chars().count() + 1;

    position_cursor(row + 1, 1);
    print!("{margin}{border}│");
    print!("{}{prefix}", Theme::fg(&theme.colors.text_dim));
    print!("{}{shown}█", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
