//! Text prompt box, shown while typing a file path or a name.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PromptInfo;

/// Horizontal margin around the box.
const PROMPT_BOX_MARGIN: usize = 2;

/// Renders a 3-line bordered box and returns the row after it.
///
/// ```text
///   ┌────────────────────────────┐
///   │ File path: ~/scans/id.png_ │
///   └────────────────────────────┘
/// ```
///
/// When the text is wider than the box its start is dropped so the cursor
/// stays visible.
pub fn render_prompt(row: usize, prompt: &PromptInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(PROMPT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    position_cursor(row, 1);
    print!("{}", " ".repeat(PROMPT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let label = format!(" {}: ", prompt.label);
    let text_room = inner_width.saturating_sub(text_width(&label) + 1);
    let text_len = text_width(&prompt.text);
    let visible_text: String = if text_len > text_room {
        prompt.text.chars().skip(text_len - text_room).collect()
    } else {
        prompt.text.clone()
    };
    let line = truncate(&format!("{label}{visible_text}_"), inner_width);
    let padding = inner_width.saturating_sub(text_width(&line));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(PROMPT_BOX_MARGIN));
    print!("{}│", Theme::fg(&theme.colors.input_border));
    print!("{}{line}", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(padding));
    print!("{}│", Theme::fg(&theme.colors.input_border));
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(PROMPT_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.input_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
