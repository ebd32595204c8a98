//! Event handling and state transitions.
//!
//! [`handle_event`] is the reducer: it takes the current [`AppState`] and one
//! [`Event`], mutates the state and returns whether a re-render is needed plus
//! the side effects to run. Replies to those side effects (web responses,
//! command output, worker messages) come back in as further events, so every
//! transition is a plain synchronous function call.
//!
//! # Event Types
//!
//! - **Input selection**: `FocusFilePrompt`, `ConfirmFilePath`,
//!   `ActivateWebcam`, `DeactivateWebcam`, `Capture`, `FocusNameField`
//! - **Text editing**: `Char`, `Backspace`, `Escape`
//! - **Checking**: `Submit`, `ToggleFlaggedLinks`, `RefreshServiceStatus`
//! - **Completions**: `FrameCaptured`, `CheckCompleted`, `StatusReceived`,
//!   `WorkerResponse`, `PermissionsResult`
//!
//! # Example
//!
//! ```rust
//! use sanction_check::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! handle_event(&mut state, &Event::FocusNameField)?;
//! for c in "Jane Doe".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::SendCheck(_)]));
//! # Ok::<(), sanction_check::domain::CheckerError>(())
//! ```

use super::modes::Focus;
use super::webcam::CommandOutcome;
use crate::api::{interpret_status_response, TransportOutcome};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{CheckError, FileInput};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input or by replies to earlier actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Opens the file path prompt.
    FocusFilePrompt,
    /// Loads the file named in the prompt.
    ConfirmFilePath,
    /// Opens the live webcam view.
    ActivateWebcam,
    /// Closes the live webcam view.
    DeactivateWebcam,
    /// Takes a snapshot from the live view.
    Capture,
    /// Moves typing focus to the name field.
    FocusNameField,

    /// Appends a character to the focused text field.
    Char(char),
    /// Removes the last character from the focused text field.
    Backspace,
    /// Leaves the focused text field.
    Escape,

    /// Submits a check for the active input.
    Submit,
    /// Expands or collapses the flagged links.
    ToggleFlaggedLinks,
    /// Queries the sanctions-list status again.
    RefreshServiceStatus,

    /// The capture command finished.
    FrameCaptured {
        /// Ticket of the capture this output belongs to.
        ticket: u64,
        outcome: CommandOutcome,
    },

    /// A check request finished.
    CheckCompleted {
        /// Ticket of the request this reply belongs to.
        ticket: u64,
        outcome: TransportOutcome,
    },

    /// The status probe finished.
    StatusReceived(TransportOutcome),

    /// The user answered the permission request.
    PermissionsResult {
        granted: bool,
    },

    /// A reply from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag tells the shim whether the UI needs re-rendering.
///
/// # Errors
///
/// Reserved for infrastructure failures; every check-related failure is
/// folded into the state instead.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::FocusFilePrompt => {
            state.focus = Focus::FilePrompt;
            state.file_prompt.clear();
            Ok((true, vec![]))
        }
        Event::ConfirmFilePath => {
            if state.focus != Focus::FilePrompt {
                return Ok((false, vec![]));
            }
            let path = state.file_prompt.trim().to_string();
            state.focus = Focus::Menu;
            state.file_prompt.clear();

            if path.is_empty() {
                return Ok((true, vec![]));
            }

            tracing::debug!(path = %path, "file requested");
            state.request_file(path.clone());
            Ok((true, vec![Action::PostToWorker(WorkerMessage::load_file(path))]))
        }
        Event::ActivateWebcam => {
            state.activate_webcam();
            Ok((true, vec![]))
        }
        Event::DeactivateWebcam => {
            if !state.inputs().webcam_live() {
                return Ok((false, vec![]));
            }
            state.deactivate_webcam();
            Ok((true, vec![]))
        }
        Event::Capture => match state.request_capture() {
            Some((ticket, command)) => Ok((true, vec![Action::CaptureFrame { ticket, command }])),
            None => Ok((true, vec![])),
        },
        Event::FocusNameField => {
            state.focus = Focus::NameField;
            Ok((true, vec![]))
        }

        Event::Char(c) => match state.focus {
            Focus::Menu => Ok((false, vec![])),
            Focus::FilePrompt => {
                state.file_prompt.push(*c);
                Ok((true, vec![]))
            }
            Focus::NameField => {
                let mut name = state.inputs().name().to_string();
                name.push(*c);
                state.set_name(name);
                Ok((true, vec![]))
            }
        },
        Event::Backspace => match state.focus {
            Focus::Menu => Ok((false, vec![])),
            Focus::FilePrompt => Ok((state.file_prompt.pop().is_some(), vec![])),
            Focus::NameField => {
                let mut name = state.inputs().name().to_string();
                if name.pop().is_none() {
                    return Ok((false, vec![]));
                }
                state.set_name(name);
                Ok((true, vec![]))
            }
        },
        Event::Escape => {
            if state.focus == Focus::Menu {
                return Ok((false, vec![]));
            }
            state.focus = Focus::Menu;
            state.file_prompt.clear();
            Ok((true, vec![]))
        }

        Event::Submit => match state.submit() {
            Some(request) => {
                state.focus = Focus::Menu;
                Ok((true, vec![Action::SendCheck(request)]))
            }
            None => Ok((true, vec![])),
        },
        Event::ToggleFlaggedLinks => Ok((state.toggle_flagged_links(), vec![])),
        Event::RefreshServiceStatus => Ok((
            false,
            vec![Action::FetchServiceStatus {
                url: state.endpoints().status_url(),
            }],
        )),

        Event::FrameCaptured { ticket, outcome } => {
            Ok((state.finish_capture(*ticket, outcome.clone()), vec![]))
        }
        Event::CheckCompleted { ticket, outcome } => {
            Ok((state.complete_check(*ticket, outcome), vec![]))
        }
        Event::StatusReceived(outcome) => {
            let status = interpret_status_response(outcome);
            tracing::debug!(status = ?status, "service status received");
            state.service_status = Some(status);
            Ok((true, vec![]))
        }
        Event::PermissionsResult { granted } => {
            if !granted {
                tracing::warn!("permissions denied, checks cannot reach the service");
                return Ok((false, vec![]));
            }
            Ok((
                false,
                vec![Action::FetchServiceStatus {
                    url: state.endpoints().status_url(),
                }],
            ))
        }

        Event::WorkerResponse(response) => match response {
            WorkerResponse::FileLoaded {
                path,
                name,
                data_base64,
            } => match FileInput::from_base64(name.clone(), data_base64) {
                Ok(file) => Ok((state.finish_file_load(path, file), vec![])),
                Err(e) => {
                    let error = CheckError::FileUnreadable {
                        path: path.clone(),
                        reason: e.to_string(),
                    };
                    Ok((state.fail_file_load(path, error), vec![]))
                }
            },
            WorkerResponse::FileUnreadable { path, reason } => {
                let error = CheckError::FileUnreadable {
                    path: path.clone(),
                    reason: reason.clone(),
                };
                Ok((state.fail_file_load(path, error), vec![]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::InputMode;

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn menu_keys_are_not_typed_into_fields() {
        let mut state = AppState::default();
        let (render, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.inputs().mode(), InputMode::None);
    }

    #[test]
    fn file_prompt_posts_a_load_request() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::FocusFilePrompt).unwrap();
        type_text(&mut state, " ~/scans/passport.jpg ");

        let (_, actions) = handle_event(&mut state, &Event::ConfirmFilePath).unwrap();
        let [Action::PostToWorker(WorkerMessage::LoadFile { path, .. })] = actions.as_slice() else {
            panic!("expected a single LoadFile, got {actions:?}");
        };
        assert_eq!(path, "~/scans/passport.jpg");
        assert_eq!(state.focus, Focus::Menu);
    }

    #[test]
    fn escape_cancels_the_prompt_without_loading() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::FocusFilePrompt).unwrap();
        type_text(&mut state, "a.jpg");
        handle_event(&mut state, &Event::Escape).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ConfirmFilePath).unwrap();
        assert!(actions.is_empty());
        assert!(state.file_prompt.is_empty());
    }

    #[test]
    fn worker_reply_selects_the_file() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::FocusFilePrompt).unwrap();
        type_text(&mut state, "id.png");
        handle_event(&mut state, &Event::ConfirmFilePath).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::FileLoaded {
                path: "id.png".into(),
                name: "id.png".into(),
                data_base64: "iVBORw==".into(),
            }),
        )
        .unwrap();

        assert!(render);
        assert_eq!(state.inputs().mode(), InputMode::File);
        assert_eq!(state.inputs().file().map(|f| f.bytes.len()), Some(4));
    }

    #[test]
    fn unreadable_file_becomes_a_notice() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::FocusFilePrompt).unwrap();
        type_text(&mut state, "big.jpg");
        handle_event(&mut state, &Event::ConfirmFilePath).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::FileUnreadable {
                path: "big.jpg".into(),
                reason: "file is empty".into(),
            }),
        )
        .unwrap();

        assert_eq!(
            state.notice().map(ToString::to_string).as_deref(),
            Some("could not read big.jpg: file is empty")
        );
        assert!(state.result().is_none());
    }

    #[test]
    fn backspace_on_empty_name_changes_nothing() {
        let mut state = AppState::default();
        state.select_file(FileInput::new("a.jpg".into(), vec![1]));
        handle_event(&mut state, &Event::FocusNameField).unwrap();
        let (render, _) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(!render);
        assert_eq!(state.inputs().mode(), InputMode::File);
    }

    #[test]
    fn capture_emits_the_configured_command() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::ActivateWebcam).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Capture).unwrap();
        let [Action::CaptureFrame { command, .. }] = actions.as_slice() else {
            panic!("expected CaptureFrame, got {actions:?}");
        };
        assert_eq!(command.first().map(String::as_str), Some("ffmpeg"));
    }

    #[test]
    fn granted_permissions_probe_the_service() {
        let mut state = AppState::default();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert_eq!(
            actions,
            vec![Action::FetchServiceStatus {
                url: "http://localhost:8000/sanctions-status/".into()
            }]
        );
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(actions.is_empty());
    }
}
