//! Result panel: headline, body, match details and flagged links.

use crate::ui::helpers::{position_cursor, print_fitted, text_width, truncate, wrap};
use crate::ui::presenter::{ResultView, Tone};
use crate::ui::theme::Theme;

const INDENT: usize = 2;
const MAX_LABEL_WIDTH: usize = 18;

/// Renders the panel from `row`, never writing at or below `last_row`.
/// Returns the next free row.
pub fn render_result(row: usize, view: &ResultView, theme: &Theme, cols: usize, last_row: usize) -> usize {
    if !view.visible {
        return row;
    }

    let width = cols.saturating_sub(INDENT * 2);
    let tone_color = match view.tone {
        Tone::Error => &theme.colors.error_fg,
        Tone::Success => &theme.colors.success_fg,
    };

    let mut current_row = row;
    emit_line(&mut current_row, last_row, &|| {
        print!("{}{}", Theme::bold(), Theme::fg(tone_color));
        print_fitted(&view.headline, width);
    });
    for body_line in wrap(&view.body, width) {
        emit_line(&mut current_row, last_row, &|| {
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print_fitted(&body_line, width);
        });
    }

    if let Some(details) = &view.match_details {
        current_row += 1;
        let label_width = details
            .iter()
            .map(|(label, _)| text_width(label))
            .max()
            .unwrap_or(0)
            .min(MAX_LABEL_WIDTH);

        for (label, value) in details {
            let label = truncate(label, label_width);
            emit_line(&mut current_row, last_row, &|| {
                print!("{}", Theme::fg(&theme.colors.label_fg));
                print!("{label}{}  ", " ".repeat(label_width.saturating_sub(text_width(&label))));
                print!("{}", Theme::fg(&theme.colors.text_normal));
                print_fitted(value, width.saturating_sub(label_width + 2));
            });
        }
    }

    if let Some(section) = &view.flagged_links {
        current_row += 1;
        let (arrow, hint) = if section.collapsed {
            ("+", "l: show")
        } else {
            ("-", "l: hide")
        };
        let heading = format!("{arrow} Flagged links ({})  {hint}", section.links.len());
        emit_line(&mut current_row, last_row, &|| {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.label_fg));
            print_fitted(&heading, width);
        });

        if !section.collapsed {
            for link in &section.links {
                emit_line(&mut current_row, last_row, &|| {
                    print!("  {}{}", Theme::underline(), Theme::fg(&theme.colors.link_fg));
                    print_fitted(link, width.saturating_sub(2));
                });
            }
        }
    }

    current_row
}

/// Prints one indented line unless the panel has run out of rows.
fn emit_line(current_row: &mut usize, last_row: usize, print_line: &dyn Fn()) {
    if *current_row >= last_row {
        return;
    }
    position_cursor(*current_row, 1);
    print!("{}", " ".repeat(INDENT));
    print_line();
    print!("{}", Theme::reset());
    *current_row += 1;
}
