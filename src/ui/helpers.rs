//! Shared rendering utilities.
//!
//! Ranges and widths here are in characters, not bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Styles `text` with the filter match colors over `ranges`.
///
/// Selected rows are returned unstyled so the selection colors stay intact.
/// After each highlighted section `restore` is emitted to return to the
/// row's base color.
///
/// ```rust
/// use hnpane::ui::helpers::highlighted_text;
/// use hnpane::ui::Theme;
///
/// let theme = Theme::default();
/// let plain = highlighted_text("Tampa Bay", &[], &theme, false, "");
/// assert_eq!(plain, "Tampa Bay");
/// ```
#[must_use]
pub fn highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) -> String {
    if ranges.is_empty() || is_selected {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() * 2);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}

/// Left-aligns `text` in a `width`-character cell.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Right-aligns `text` in a `width`-character cell.
#[must_use]
pub fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{text}", " ".repeat(width.saturating_sub(len)))
}

/// Left padding that centers `len` characters in `cols`.
#[must_use]
pub const fn center_padding(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_wraps_ranges() {
        let theme = Theme::default();
        let on = format!(
            "{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg)
        );
        let off = Theme::reset();

        let out = highlighted_text("Tampa Bay", &[(6, 9)], &theme, false, "");
        assert_eq!(out, format!("Tampa {on}Bay{off}"));
    }

    #[test]
    fn test_highlight_skipped_for_selected_rows() {
        let theme = Theme::default();
        assert_eq!(highlighted_text("Tampa", &[(0, 2)], &theme, true, ""), "Tampa");
    }

    #[test]
    fn test_highlight_clamps_out_of_range() {
        let theme = Theme::default();
        let out = highlighted_text("abc", &[(1, 10)], &theme, false, "");
        assert!(out.starts_with('a'));
        assert!(out.contains("bc"));
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("7", 3), "  7");
        assert_eq!(pad_left("toolong", 3), "toolong");
        assert_eq!(center_padding(4, 10), 3);
    }
}
