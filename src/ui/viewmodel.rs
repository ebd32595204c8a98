//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings only; no component looks at
//! `AppState` directly.
//!
//! # Example
//!
//! ```rust
//! use sanction_check::ui::viewmodel::{FooterInfo, HeaderInfo, UIViewModel};
//! use sanction_check::ui::presenter::ResultView;
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Sanction Check ".to_string(), subtitle: None },
//!     inputs: vec![],
//!     prompt: None,
//!     status_line: None,
//!     notice: None,
//!     result: ResultView::hidden(),
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert!(vm.prompt.is_none());
//! ```

use crate::ui::presenter::ResultView;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// One row per input source, in shortcut order.
    pub inputs: Vec<InputRow>,

    /// Text box shown while typing a file path or a name.
    pub prompt: Option<PromptInfo>,

    /// Progress text, e.g. while a check or capture is outstanding.
    pub status_line: Option<String>,

    /// Transient message that is not a check result (camera or file problems,
    /// duplicate submit).
    pub notice: Option<String>,

    pub result: ResultView,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
    /// Sanctions-list status, once known.
    pub subtitle: Option<String>,
}

/// One input source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// Key that selects this source.
    pub key: char,
    pub label: String,
    pub value: String,
    /// This source is the one a submit would send.
    pub is_active: bool,
}

/// Text box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInfo {
    pub label: String,
    pub text: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
