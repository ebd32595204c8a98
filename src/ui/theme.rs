//! Theme management and ANSI escape sequence generation.
//!
//! Themes are either built in (Catppuccin Mocha and Latte) or loaded from a
//! TOML file named by the `theme_file` configuration key.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! header_bg = "#313244"   # optional
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_border = "#89b4fa"
//! active_fg = "#f5c2e7"
//! label_fg = "#89dceb"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! notice_fg = "#f9e2af"
//! link_fg = "#74c7ec"
//! ```

use crate::domain::error::{CheckerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text: footer, inactive rows, status subtitle.
    pub text_dim: String,
    pub border: String,

    /// Frame of the text prompt.
    pub input_border: String,
    /// Marker of the input source a submit would send.
    pub active_fg: String,
    /// Match detail labels.
    pub label_fg: String,

    pub success_fg: String,
    pub error_fg: String,
    /// Camera and file problems, duplicate submits.
    pub notice_fg: String,
    pub link_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name: `catppuccin-mocha` or
    /// `catppuccin-latte`.
    ///
    /// ```rust
    /// use sanction_check::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Io`] if the file cannot be read and
    /// [`CheckerError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| CheckerError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`; anything malformed renders as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape sequence.
    ///
    /// ```rust
    /// use sanction_check::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#a6e3a1"), "\u{1b}[38;2;166;227;161m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the theme tests
    /// rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("Built-in catppuccin-mocha theme should always parse")
    }
}
