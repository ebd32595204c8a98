//! Submission of a compliance check.
//!
//! The coordinator is a single-slot task: [`SubmissionCoordinator::begin`]
//! either rejects the submission or hands back exactly one [`CheckRequest`]
//! and moves to `InFlight`. The reply comes back later as a completion
//! carrying the request's ticket; [`SubmissionCoordinator::complete`] turns it
//! into a [`CheckResult`] and always returns the slot to `Idle`.
//!
//! Tickets increase monotonically, so a completion whose ticket does not match
//! the outstanding request is recognisably stale and dropped.

use super::controller::InputModeController;
use super::modes::{InputMode, SubmissionState};
use crate::api::{interpret_check_response, CheckRequest, Endpoints, TransportOutcome};
use crate::domain::{CheckError, CheckResult};

pub const MISSING_IMAGE_MESSAGE: &str = "Please select a file or capture an image to upload.";
pub const MISSING_NAME_MESSAGE: &str = "Please enter a full name to search.";
pub const NO_INPUT_MESSAGE: &str = "Please choose a passport image or enter a name first.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionCoordinator {
    endpoints: Endpoints,
    state: SubmissionState,
    next_ticket: u64,
}

impl SubmissionCoordinator {
    #[must_use]
    pub const fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            state: SubmissionState::Idle,
            next_ticket: 1,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Starts a check for the active input.
    ///
    /// A submission already in flight is rejected before the inputs are
    /// looked at. On success the coordinator is `InFlight` with the returned
    /// request's ticket.
    ///
    /// # Errors
    ///
    /// - [`CheckError::AlreadyInProgress`] while a request is outstanding.
    /// - [`CheckError::Validation`] when the active mode has nothing to send.
    pub fn begin(&mut self, inputs: &InputModeController) -> Result<CheckRequest, CheckError> {
        if let SubmissionState::InFlight { ticket } = self.state {
            tracing::debug!(outstanding_ticket = ticket, "submit ignored, check in flight");
            return Err(CheckError::AlreadyInProgress);
        }

        let ticket = self.next_ticket;
        let request = match inputs.mode() {
            InputMode::File => {
                let file = inputs.file().ok_or_else(|| validation(MISSING_IMAGE_MESSAGE))?;
                CheckRequest::file(ticket, &self.endpoints, file)
            }
            InputMode::Webcam => {
                let image = inputs
                    .capture_image()
                    .ok_or_else(|| validation(MISSING_IMAGE_MESSAGE))?;
                CheckRequest::image(ticket, &self.endpoints, image)
            }
            InputMode::Name => {
                let full_name = inputs.name().trim();
                if full_name.is_empty() {
                    return Err(validation(MISSING_NAME_MESSAGE));
                }
                CheckRequest::name(ticket, &self.endpoints, full_name)
            }
            InputMode::None => return Err(validation(NO_INPUT_MESSAGE)),
        };

        self.next_ticket += 1;
        self.state = SubmissionState::InFlight { ticket };
        tracing::info!(ticket, endpoint = ?request.endpoint, mode = inputs.mode().label(), "check submitted");
        Ok(request)
    }

    /// Finishes the outstanding request.
    ///
    /// Returns `None` and changes nothing when `ticket` is not the one in
    /// flight. Otherwise the slot is released whatever the outcome.
    pub fn complete(&mut self, ticket: u64, outcome: &TransportOutcome) -> Option<CheckResult> {
        match self.state {
            SubmissionState::InFlight { ticket: outstanding } if outstanding == ticket => {
                self.state = SubmissionState::Idle;
                let result = interpret_check_response(outcome);
                tracing::info!(ticket, success = result.is_success(), "check completed");
                Some(result)
            }
            state => {
                tracing::debug!(ticket, ?state, "stale completion dropped");
                None
            }
        }
    }
}

impl Default for SubmissionCoordinator {
    fn default() -> Self {
        Self::new(Endpoints::default())
    }
}

fn validation(message: &str) -> CheckError {
    CheckError::Validation(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CheckEndpoint;
    use crate::domain::{CapturedImage, FileInput};

    fn coordinator() -> SubmissionCoordinator {
        SubmissionCoordinator::new(Endpoints::new("http://checker.test/"))
    }

    fn ok_body(message: &str) -> TransportOutcome {
        TransportOutcome::Response {
            status: 200,
            body: format!(r#"{{"success":true,"message":"{message}","match_found":false}}"#).into_bytes(),
        }
    }

    #[test]
    fn empty_inputs_are_rejected_without_a_request() {
        let mut coordinator = coordinator();
        let mut inputs = InputModeController::default();

        assert_eq!(
            coordinator.begin(&inputs),
            Err(CheckError::Validation(NO_INPUT_MESSAGE.into()))
        );

        inputs.set_name("   \t ".into());
        assert_eq!(
            coordinator.begin(&inputs),
            Err(CheckError::Validation(MISSING_NAME_MESSAGE.into()))
        );

        inputs.activate_webcam();
        assert_eq!(
            coordinator.begin(&inputs),
            Err(CheckError::Validation(MISSING_IMAGE_MESSAGE.into()))
        );
        assert_eq!(coordinator.state(), SubmissionState::Idle);
    }

    #[test]
    fn name_is_trimmed_before_sending() {
        let mut coordinator = coordinator();
        let mut inputs = InputModeController::default();
        inputs.set_name("  Jane Doe ".into());

        let request = coordinator.begin(&inputs).unwrap();
        assert_eq!(request.endpoint, CheckEndpoint::Name);
        assert_eq!(request.url, "http://checker.test/check-name/");
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["full_name"], "Jane Doe");
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut coordinator = coordinator();
        let mut inputs = InputModeController::default();
        inputs.select_file(FileInput::new("passport.jpg".into(), vec![0xff, 0xd8]));

        let first = coordinator.begin(&inputs).unwrap();
        assert_eq!(coordinator.state(), SubmissionState::InFlight { ticket: first.ticket });
        assert_eq!(coordinator.begin(&inputs), Err(CheckError::AlreadyInProgress));

        // Still rejected as in-progress even with nothing valid to send.
        inputs.set_name(String::new());
        assert_eq!(coordinator.begin(&inputs), Err(CheckError::AlreadyInProgress));
    }

    #[test]
    fn completion_releases_the_slot_on_every_outcome() {
        let mut coordinator = coordinator();
        let mut inputs = InputModeController::default();
        inputs.activate_webcam();
        inputs
            .capture(CapturedImage::from_data_uri("data:image/jpeg;base64,QUJD".into()))
            .unwrap();

        let outcomes = [
            ok_body("fine"),
            TransportOutcome::Response {
                status: 500,
                body: Vec::new(),
            },
            TransportOutcome::Failed {
                reason: "connection refused".into(),
            },
        ];

        for outcome in &outcomes {
            let request = coordinator.begin(&inputs).unwrap();
            assert!(coordinator.complete(request.ticket, outcome).is_some());
            assert_eq!(coordinator.state(), SubmissionState::Idle);
        }
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut coordinator = coordinator();
        let mut inputs = InputModeController::default();
        inputs.set_name("Jane".into());

        let first = coordinator.begin(&inputs).unwrap();
        assert!(coordinator.complete(first.ticket, &ok_body("one")).is_some());

        let second = coordinator.begin(&inputs).unwrap();
        assert_ne!(first.ticket, second.ticket);
        assert_eq!(coordinator.complete(first.ticket, &ok_body("late")), None);
        assert!(coordinator.state().is_in_flight());

        let result = coordinator.complete(second.ticket, &ok_body("two")).unwrap();
        assert_eq!(result.message(), "two");
    }
}
