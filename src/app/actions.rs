//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never performs I/O. It returns a
//! `Vec<Action>` and the plugin shim executes each one in order: web requests,
//! host commands and worker messages all leave through here, and their replies
//! come back as [`Event`](super::Event)s.
//!
//! # Example
//!
//! ```rust
//! use sanction_check::app::Action;
//! use sanction_check::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::load_file("~/passport.jpg".into()))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::api::CheckRequest;
use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Posts a message to the background worker.
    PostToWorker(WorkerMessage),

    /// Issues a compliance check over HTTP.
    ///
    /// The reply must be delivered back as
    /// [`Event::CheckCompleted`](super::Event::CheckCompleted) with the
    /// request's ticket.
    SendCheck(CheckRequest),

    /// Runs the capture command on the host; stdout is expected to be one
    /// JPEG frame.
    ///
    /// The output must be delivered back as
    /// [`Event::FrameCaptured`](super::Event::FrameCaptured) with this ticket.
    CaptureFrame {
        ticket: u64,
        command: Vec<String>,
    },

    /// Queries the service's sanctions-list status.
    FetchServiceStatus {
        url: String,
    },
}
