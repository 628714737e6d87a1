//! Loading, failure and empty panels shown in place of the hits table.

use crate::ui::helpers::{center_padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusPanel};

/// Renders the panel's message and subtitle centered at `row` and `row + 1`.
pub fn render_status(row: usize, panel: &StatusPanel, theme: &Theme, cols: usize) -> usize {
    let color = match panel.kind {
        StatusKind::Error => &theme.colors.error_fg,
        StatusKind::Loading | StatusKind::Empty => &theme.colors.status_fg,
    };

    let message: String = panel.message.chars().take(cols).collect();
    let msg_len = message.chars().count();
    let msg_padding = center_padding(msg_len, cols);

    position_cursor(row, 1);
    print!("{}{}", Theme::bold(), Theme::fg(color));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle: String = panel.subtitle.chars().take(cols).collect();
    let sub_len = subtitle.chars().count();
    let sub_padding = center_padding(sub_len, cols);

    position_cursor(row + 1, 1);
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());

    row + 2
}
