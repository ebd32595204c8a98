//! Composable UI component renderers.
//!
//! - [`header`]: title bar with the sanctions-list status
//! - [`inputs`]: one row per input source, active source marked
//! - [`prompt`]: bordered text box for the file path or the name
//! - [`result`]: the check result panel
//! - [`footer`]: keybinding hints
//!
//! [`render_layout`] stacks them:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Input rows]
//! [Prompt - 3 lines, while typing]
//! [Status line / notice]
//! [Result panel]
//! [Blank padding]
//! [Border]
//! [Footer]
//! ```

pub mod footer;
pub mod header;
pub mod inputs;
pub mod prompt;
pub mod result;

use crate::ui::helpers::{position_cursor, print_fitted};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use header::render_header;
use inputs::render_input_rows;
use prompt::render_prompt;
use result::render_result;

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

fn render_message(row: usize, text: &str, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}  ", Theme::fg(color));
    print_fitted(text, cols.saturating_sub(2));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full plugin layout.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.saturating_sub(1);
    let bottom_border_row = footer_row.saturating_sub(1);

    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_input_rows(current_row, &vm.inputs, theme, cols);

    if let Some(prompt) = &vm.prompt {
        current_row = render_prompt(current_row, prompt, theme, cols);
    }

    current_row += 1;
    if let Some(status) = &vm.status_line {
        current_row = render_message(current_row, status, &theme.colors.text_dim, cols);
    }
    if let Some(notice) = &vm.notice {
        current_row = render_message(current_row, notice, &theme.colors.notice_fg, cols);
    }

    let _current_row = render_result(current_row, &vm.result, theme, cols, bottom_border_row);

    render_border(bottom_border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
