//! Input source rows.

use crate::ui::helpers::{position_cursor, print_fitted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputRow;

const LABEL_WIDTH: usize = 8;

/// Renders one line per input source and returns the next free row.
///
/// ```text
///  > [f] File    passport.jpg (120 KB)
///    [w] Camera  off
///    [n] Name    none
/// ```
pub fn render_input_rows(row: usize, rows: &[InputRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for input in rows {
        position_cursor(current_row, 1);

        let marker = if input.is_active { " > " } else { "   " };
        let label_color = if input.is_active {
            &theme.colors.active_fg
        } else {
            &theme.colors.text_dim
        };

        print!("{}{marker}[{}] ", Theme::fg(label_color), input.key);
        if input.is_active {
            print!("{}", Theme::bold());
        }
        print!("{:<LABEL_WIDTH$}", input.label);
        print!("{}", Theme::reset());

        print!("{}", Theme::fg(&theme.colors.text_normal));
        let used = marker.len() + 4 + LABEL_WIDTH;
        print_fitted(&input.value, cols.saturating_sub(used));
        print!("{}", Theme::reset());

        current_row += 1;
    }
    current_row
}
