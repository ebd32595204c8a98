//! Header component renderer.
//!
//! Title bar across the full width, with the sanctions-list status right
//! aligned when it is known.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row.
///
/// ```text
/// [left padding] TITLE [padding] list: 1532 entries, updated 2d ago
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = text_width(&title);
    let padding = cols.saturating_sub(title_len) / 2;

    let subtitle = header.subtitle.as_deref().map_or_else(String::new, |s| format!("{s} "));
    let room = cols.saturating_sub(padding + title_len + 1);
    let subtitle = if text_width(&subtitle) > room {
        String::new()
    } else {
        subtitle
    };
    let gap = cols.saturating_sub(padding + title_len + text_width(&subtitle));

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print!("{}{}{title}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}", Theme::reset());
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(gap));
    print!("{}{subtitle}", Theme::fg(&theme.colors.text_dim));
    print!("{}", Theme::reset());
    row + 1
}
