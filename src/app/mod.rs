//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain, api and worker
//! layers. Data flows one way:
//!
//! ```text
//! Key / reply → Event → handle_event → AppState mutation → Actions → Side effects
//!                            ↑                                         ↓
//!                            └──── web, command and worker replies ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the event handler
//! - [`controller`]: input mode exclusivity (file, webcam capture, name)
//! - [`handler`]: the reducer
//! - [`modes`]: state machine enums
//! - [`state`]: central state container and view model computation
//! - [`submission`]: single-slot check submission
//! - [`webcam`]: still capture through a host command

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod state;
pub mod submission;
pub mod webcam;

pub use actions::Action;
pub use controller::InputModeController;
pub use handler::{handle_event, Event};
pub use modes::{CapturePolicy, Focus, InputMode, SubmissionState};
pub use state::AppState;
pub use submission::SubmissionCoordinator;
pub use webcam::{CommandOutcome, WebcamSession};
