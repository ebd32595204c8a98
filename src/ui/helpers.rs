//! Shared rendering utilities.
//!
//! Widths are counted in `char`s, not bytes, so names with accents or
//! non-Latin scripts do not break the padding.

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of display columns taken by `text`.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters, ending in `...` when shortened.
///
/// ```rust
/// use sanction_check::ui::helpers::truncate;
///
/// assert_eq!(truncate("Müller-Lüdenscheidt", 10), "Müller-...");
/// assert_eq!(truncate("short", 10), "short");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Prints `text` truncated to `cols` and pads the rest of the line.
pub fn print_fitted(text: &str, cols: usize) {
    let fitted = truncate(text, cols);
    print!("{fitted}");
    print!("{}", " ".repeat(cols.saturating_sub(text_width(&fitted))));
}

/// Splits `text` into lines of at most `width` characters, breaking on
/// whitespace where possible.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            text_width(word)
        } else {
            text_width(&current) + 1 + text_width(word)
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if text_width(word) > width {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current = chunk.iter().collect();
            }
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap("Successfully checked name: Jane Doe", 20),
            vec!["Successfully checked", "name: Jane Doe"]
        );
    }

    #[test]
    fn splits_words_longer_than_the_line() {
        assert_eq!(
            wrap("could not read ~/scans/passport.jpg: file is empty", 20),
            vec!["could not read", "~/scans/passport.jpg", ": file is empty"]
        );
        assert!(wrap("anything", 0).is_empty());
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate("ÅÄÖÅÄÖ", 5), "ÅÄ...");
        assert_eq!(text_width("ÅÄÖ"), 3);
    }
}
