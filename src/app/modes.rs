//! State machine enums for input handling and submission.
//!
//! # State Machine
//!
//! [`InputMode`] names the single source a check will be run against. It
//! starts as `None` and, once the user picks a source, always holds exactly
//! one of `File`, `Webcam` or `Name`.
//!
//! [`SubmissionState`] is a single-slot task: `Idle` or `InFlight` with the
//! ticket of the outstanding request.
//!
//! [`Focus`] is purely about keyboard routing (which widget receives typed
//! characters) and never affects what gets submitted.
//!
//! # Example
//!
//! ```rust
//! use sanction_check::app::modes::{Focus, InputMode, SubmissionState};
//!
//! let mode = InputMode::None;
//! let submission = SubmissionState::Idle;
//! assert!(!submission.is_in_flight());
//! assert_eq!(Focus::default(), Focus::Menu);
//! # let _ = mode;
//! ```

/// The active input source for a compliance check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Nothing chosen yet.
    #[default]
    None,
    /// A passport image file loaded from disk.
    File,
    /// A still captured from the webcam.
    Webcam,
    /// A typed full name.
    Name,
}

impl InputMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::File => "file",
            Self::Webcam => "webcam",
            Self::Name => "name",
        }
    }
}

/// Whether a check request is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// A request was issued and its completion has not arrived yet.
    InFlight {
        /// Ticket of the outstanding request.
        ticket: u64,
    },
}

impl SubmissionState {
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::InFlight { .. })
    }
}

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Single-key commands (f, w, c, x, n, l, q, Enter).
    #[default]
    Menu,
    /// Typing a file path to load.
    FilePrompt,
    /// Typing the full name.
    NameField,
}

/// What happens to a captured frame when the live webcam view is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapturePolicy {
    /// The capture stays and can still be submitted.
    #[default]
    KeepOnDeactivate,
    /// Closing the live view discards the capture.
    ClearOnDeactivate,
}
