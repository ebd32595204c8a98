//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin. The input set and
//! the submission slot are private and change only through the methods below,
//! each of which also maintains the derived display state (result, notice,
//! link toggle) the way the input rules require:
//!
//! - every input change clears the previous check result and notice;
//! - a new result always starts with its flagged links collapsed;
//! - a capture reply is applied only if it is the one last asked for.
//!
//! # Example
//!
//! ```rust
//! use sanction_check::app::AppState;
//!
//! let mut state = AppState::default();
//! state.set_name("Jane Doe".to_string());
//! let request = state.submit().expect("name is populated");
//! assert!(request.url.ends_with("/check-name/"));
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.status_line.as_deref(), Some("Checking..."));
//! ```

use super::controller::InputModeController;
use super::modes::{CapturePolicy, Focus, InputMode, SubmissionState};
use super::submission::SubmissionCoordinator;
use super::webcam::{CommandOutcome, WebcamSession};
use crate::api::{CheckRequest, Endpoints, TransportOutcome};
use crate::domain::{CheckError, CheckResult, FileInput, ServiceStatus};
use crate::ui::presenter;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, HeaderInfo, InputRow, PromptInfo, UIViewModel};

const TITLE: &str = " Sanction Check ";

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    inputs: InputModeController,
    submission: SubmissionCoordinator,
    webcam: WebcamSession,
    result: Option<CheckResult>,
    links_collapsed: bool,
    notice: Option<CheckError>,
    /// Ticket of the running capture whose frame is still wanted.
    capture_pending: Option<u64>,
    next_capture_ticket: u64,
    /// Path of the most recent file load request.
    pending_file: Option<String>,

    /// Which widget receives typed characters.
    pub focus: Focus,

    /// Text typed into the file path prompt.
    pub file_prompt: String,

    /// Last sanctions-list status reported by the service.
    pub service_status: Option<ServiceStatus>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(endpoints: Endpoints, policy: CapturePolicy, webcam: WebcamSession, theme: Theme) -> Self {
        Self {
            inputs: InputModeController::new(policy),
            submission: SubmissionCoordinator::new(endpoints),
            webcam,
            result: None,
            links_collapsed: true,
            notice: None,
            capture_pending: None,
            next_capture_ticket: 1,
            pending_file: None,
            focus: Focus::Menu,
            file_prompt: String::new(),
            service_status: None,
            theme,
        }
    }

    #[must_use]
    pub const fn inputs(&self) -> &InputModeController {
        &self.inputs
    }

    #[must_use]
    pub const fn submission_state(&self) -> SubmissionState {
        self.submission.state()
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        self.submission.endpoints()
    }

    #[must_use]
    pub const fn result(&self) -> Option<&CheckResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&CheckError> {
        self.notice.as_ref()
    }

    #[must_use]
    pub const fn links_collapsed(&self) -> bool {
        self.links_collapsed
    }

    #[must_use]
    pub const fn capture_pending(&self) -> bool {
        self.capture_pending.is_some()
    }

    /// Records a file load request; only the latest one will be applied.
    pub fn request_file(&mut self, path: String) {
        self.pending_file = Some(path);
        self.notice = None;
    }

    /// Applies a loaded file if it answers the latest request.
    ///
    /// Returns `false` when the reply was superseded.
    pub fn finish_file_load(&mut self, path: &str, file: FileInput) -> bool {
        if self.pending_file.as_deref() != Some(path) {
            tracing::debug!(path = %path, "superseded file load dropped");
            return false;
        }
        self.pending_file = None;
        self.select_file(file);
        true
    }

    /// Reports a failed file load for the latest request.
    pub fn fail_file_load(&mut self, path: &str, error: CheckError) -> bool {
        if self.pending_file.as_deref() != Some(path) {
            return false;
        }
        self.pending_file = None;
        self.notice = Some(error);
        true
    }

    pub fn select_file(&mut self, file: FileInput) {
        self.inputs.select_file(file);
        self.capture_pending = None;
        self.clear_outcome();
    }

    pub fn activate_webcam(&mut self) {
        self.inputs.activate_webcam();
        self.capture_pending = None;
        self.clear_outcome();
    }

    /// Turns the live view off. The result panel is left alone.
    pub fn deactivate_webcam(&mut self) {
        self.inputs.deactivate_webcam();
        self.capture_pending = None;
    }

    /// Starts a capture and returns its ticket and the command to run.
    ///
    /// Returns `None` (and sets a notice) when the live view is off, and
    /// `None` silently while an earlier capture is still running.
    pub fn request_capture(&mut self) -> Option<(u64, Vec<String>)> {
        if !self.inputs.webcam_live() {
            self.notice = Some(CheckError::CameraUnavailable(
                "turn the camera on before capturing".to_string(),
            ));
            return None;
        }
        if self.capture_pending.is_some() {
            return None;
        }
        let ticket = self.next_capture_ticket;
        self.next_capture_ticket += 1;
        self.capture_pending = Some(ticket);
        self.notice = None;
        Some((ticket, self.webcam.command().to_vec()))
    }

    /// Applies the outcome of capture `ticket`.
    ///
    /// Returns `false` if `ticket` is not the pending capture (the view was
    /// reopened or closed, or the mode changed since), in which case the
    /// frame is discarded.
    pub fn finish_capture(&mut self, ticket: u64, outcome: CommandOutcome) -> bool {
        if self.capture_pending != Some(ticket) {
            tracing::debug!(ticket, pending = ?self.capture_pending, outcome = ?outcome, "late capture discarded");
            return false;
        }
        self.capture_pending = None;

        match self.webcam.finish(outcome) {
            Ok(image) => {
                if self.inputs.capture(image).is_err() {
                    tracing::debug!("capture arrived after the live view closed");
                    return false;
                }
                self.clear_outcome();
            }
            Err(error) => {
                tracing::warn!(error = %error, "capture failed");
                self.notice = Some(error);
            }
        }
        true
    }

    pub fn set_name(&mut self, text: String) {
        self.inputs.set_name(text);
        self.capture_pending = None;
        self.clear_outcome();
    }

    /// Attempts a submission.
    ///
    /// On success the previous result is cleared and the request to send is
    /// returned. A validation failure becomes the shown result; a duplicate
    /// submit only raises a notice so the pending check is not disturbed.
    pub fn submit(&mut self) -> Option<CheckRequest> {
        match self.submission.begin(&self.inputs) {
            Ok(request) => {
                self.clear_outcome();
                Some(request)
            }
            Err(error @ CheckError::AlreadyInProgress) => {
                self.notice = Some(error);
                None
            }
            Err(error) => {
                self.notice = None;
                self.set_result(error.into());
                None
            }
        }
    }

    /// Applies a check completion. Returns `false` for stale tickets.
    pub fn complete_check(&mut self, ticket: u64, outcome: &TransportOutcome) -> bool {
        match self.submission.complete(ticket, outcome) {
            Some(result) => {
                self.set_result(result);
                true
            }
            None => false,
        }
    }

    /// Flips the flagged-links section. Returns `false` if no section is
    /// shown.
    pub fn toggle_flagged_links(&mut self) -> bool {
        let has_links = matches!(
            &self.result,
            Some(CheckResult::Success {
                match_found: true,
                flagged_links: Some(links),
                ..
            }) if !links.is_empty()
        );
        if has_links {
            self.links_collapsed = !self.links_collapsed;
        }
        has_links
    }

    fn set_result(&mut self, result: CheckResult) {
        self.result = Some(result);
        self.links_collapsed = true;
    }

    fn clear_outcome(&mut self) {
        self.result = None;
        self.links_collapsed = true;
        self.notice = None;
    }

    /// Computes the renderable view model.
    #[must_use]
    pub fn compute_viewmodel(&self, _rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            inputs: self.compute_input_rows(cols),
            prompt: self.compute_prompt(),
            status_line: self.compute_status_line(),
            notice: self.notice.as_ref().map(ToString::to_string),
            result: presenter::present(self.result.as_ref(), self.submission.state(), self.links_collapsed),
            footer: self.compute_footer(),
        }
    }

    /// The service reports `last_updated` as naive UTC, so the age is
    /// measured against the UTC clock. Accurate to the minute at best.
    fn compute_header(&self) -> HeaderInfo {
        let now = chrono::Utc::now().naive_utc();
        HeaderInfo {
            title: TITLE.to_string(),
            subtitle: self.service_status.as_ref().map(|status| status.summary(now)),
        }
    }

    fn compute_input_rows(&self, cols: usize) -> Vec<InputRow> {
        let mode = self.inputs.mode();
        let max_value_width = cols.saturating_sub(16);

        let file = self.inputs.file().map_or_else(
            || "none".to_string(),
            |file| format!("{} ({})", file.name, format_size(file.bytes.len())),
        );

        let webcam = match (self.inputs.webcam_live(), self.inputs.capture_image()) {
            (true, Some(image)) => format!("live, frame captured ({})", format_size(image.approx_len())),
            (true, None) => "live, press c to capture".to_string(),
            (false, Some(image)) => format!("off, frame captured ({})", format_size(image.approx_len())),
            (false, None) => "off".to_string(),
        };

        let name = if self.inputs.name().is_empty() {
            "none".to_string()
        } else {
            self.inputs.name().to_string()
        };

        [
            ('f', "File", file, InputMode::File),
            ('w', "Camera", webcam, InputMode::Webcam),
            ('n', "Name", name, InputMode::Name),
        ]
        .into_iter()
        .map(|(key, label, value, row_mode)| InputRow {
            key,
            label: label.to_string(),
            value: truncate_start(&value, max_value_width),
            is_active: mode == row_mode,
        })
        .collect()
    }

    fn compute_prompt(&self) -> Option<PromptInfo> {
        match self.focus {
            Focus::Menu => None,
            Focus::FilePrompt => Some(PromptInfo {
                label: "File path".to_string(),
                text: self.file_prompt.clone(),
            }),
            Focus::NameField => Some(PromptInfo {
                label: "Full name".to_string(),
                text: self.inputs.name().to_string(),
            }),
        }
    }

    fn compute_status_line(&self) -> Option<String> {
        if self.submission.state().is_in_flight() {
            Some("Checking...".to_string())
        } else if self.capture_pending.is_some() {
            Some("Capturing frame...".to_string())
        } else if let Some(path) = &self.pending_file {
            Some(format!("Loading {path}..."))
        } else {
            None
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            Focus::Menu => {
                "f: file  w: camera on  c: capture  x: camera off  n: name  Enter: check  l: links  q: quit"
            }
            Focus::FilePrompt => "Type a path (~ is home)  Enter: load  Esc: cancel",
            Focus::NameField => "Type the full name  Enter: check  Esc: back",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Endpoints::default(),
            CapturePolicy::default(),
            WebcamSession::default(),
            Theme::default(),
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;

    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Keeps the end of `text` (file names and surnames matter most) within
/// `max_width` characters.
fn truncate_start(text: &str, max_width: usize) -> String {
    let len = text.chars().count();
    if len <= max_width || max_width < 4 {
        return text.to_string();
    }
    let keep: String = text.chars().skip(len - (max_width - 3)).collect();
    format!("...{keep}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CapturedImage;

    fn jpeg_outcome() -> CommandOutcome {
        CommandOutcome {
            exit_code: Some(0),
            stdout: vec![0xff, 0xd8, 0xff, 0xd9],
            stderr: Vec::new(),
        }
    }

    fn match_with_links() -> TransportOutcome {
        TransportOutcome::Response {
            status: 200,
            body: br#"{"success":true,"message":"hit","match_found":true,
                       "match_details":{"name":"X","links":["http://a"]}}"#
                .to_vec(),
        }
    }

    #[test]
    fn mode_switch_clears_the_result() {
        let mut state = AppState::default();
        state.set_name("Jane".into());
        let request = state.submit().unwrap();
        assert!(state.complete_check(request.ticket, &match_with_links()));
        assert!(state.result().is_some());

        state.select_file(FileInput::new("a.jpg".into(), vec![1]));
        assert!(state.result().is_none());
    }

    #[test]
    fn validation_failure_is_shown_as_result() {
        let mut state = AppState::default();
        assert!(state.submit().is_none());
        assert!(matches!(state.result(), Some(CheckResult::Failure { .. })));
        assert_eq!(state.submission_state(), SubmissionState::Idle);
    }

    #[test]
    fn duplicate_submit_raises_notice_only() {
        let mut state = AppState::default();
        state.set_name("Jane".into());
        assert!(state.submit().is_some());
        assert!(state.submit().is_none());
        assert_eq!(state.notice(), Some(&CheckError::AlreadyInProgress));
        assert!(state.result().is_none());
    }

    fn start_capture(state: &mut AppState) -> u64 {
        state.request_capture().map(|(ticket, _)| ticket).unwrap()
    }

    fn frame(tag: u8) -> CommandOutcome {
        CommandOutcome {
            exit_code: Some(0),
            stdout: vec![0xff, 0xd8, tag, tag],
            stderr: Vec::new(),
        }
    }

    #[test]
    fn capture_is_applied_only_while_wanted() {
        let mut state = AppState::default();
        assert!(state.request_capture().is_none());
        assert!(matches!(state.notice(), Some(CheckError::CameraUnavailable(_))));

        state.activate_webcam();
        let ticket = start_capture(&mut state);
        assert!(state.request_capture().is_none(), "second capture while pending");
        assert!(state.finish_capture(ticket, jpeg_outcome()));
        assert!(state.inputs().capture_image().is_some());

        let ticket = start_capture(&mut state);
        state.set_name("J".into());
        assert!(!state.finish_capture(ticket, jpeg_outcome()));
        assert_eq!(state.inputs().mode(), InputMode::Name);
        assert!(state.inputs().capture_image().is_none());
    }

    #[test]
    fn frame_from_a_reopened_session_is_not_stored() {
        let mut state = AppState::default();
        state.activate_webcam();
        let first = start_capture(&mut state);
        state.activate_webcam();
        let second = start_capture(&mut state);
        assert_ne!(first, second);

        assert!(!state.finish_capture(first, frame(0x11)));
        assert!(state.inputs().capture_image().is_none());
        assert!(state.capture_pending());

        assert!(state.finish_capture(second, frame(0x22)));
        assert_eq!(
            state.inputs().capture_image().map(CapturedImage::data_uri),
            Some("data:image/jpeg;base64,/9giIg==")
        );
        assert!(!state.capture_pending());
    }

    #[test]
    fn failed_capture_keeps_previous_frame() {
        let mut state = AppState::default();
        state.activate_webcam();
        let ticket = start_capture(&mut state);
        state.finish_capture(ticket, jpeg_outcome());
        let before = state.inputs().capture_image().cloned();

        let ticket = start_capture(&mut state);
        state.finish_capture(ticket, CommandOutcome {
            exit_code: Some(1),
            stdout: Vec::new(),
            stderr: b"device busy".to_vec(),
        });
        assert_eq!(state.inputs().capture_image().cloned(), before);
        assert_eq!(
            state.notice(),
            Some(&CheckError::CameraUnavailable("device busy".into()))
        );
    }

    #[test]
    fn links_toggle_and_reset_with_new_results() {
        let mut state = AppState::default();
        assert!(!state.toggle_flagged_links());

        state.set_name("Jane".into());
        let first = state.submit().unwrap();
        state.complete_check(first.ticket, &match_with_links());
        assert!(state.links_collapsed());
        assert!(state.toggle_flagged_links());
        assert!(!state.links_collapsed());

        let second = state.submit().unwrap();
        state.complete_check(second.ticket, &match_with_links());
        assert!(state.links_collapsed());
    }

    #[test]
    fn superseded_file_loads_are_dropped() {
        let mut state = AppState::default();
        state.request_file("~/a.jpg".into());
        state.request_file("~/b.jpg".into());

        assert!(!state.finish_file_load("~/a.jpg", FileInput::new("a.jpg".into(), vec![1])));
        assert!(state.finish_file_load("~/b.jpg", FileInput::new("b.jpg".into(), vec![2])));
        assert_eq!(state.inputs().file().map(|f| f.name.as_str()), Some("b.jpg"));
    }

    #[test]
    fn viewmodel_marks_the_active_source() {
        let mut state = AppState::default();
        state.activate_webcam();
        let ticket = start_capture(&mut state);
        state.finish_capture(ticket, jpeg_outcome());
        state.deactivate_webcam();

        let vm = state.compute_viewmodel(24, 80);
        let active: Vec<char> = vm.inputs.iter().filter(|row| row.is_active).map(|row| row.key).collect();
        assert_eq!(active, ['w']);
        assert!(vm.inputs[1].value.starts_with("off, frame captured"));
        assert!(!vm.result.visible);
    }

    #[test]
    fn list_age_is_measured_in_utc() {
        let mut state = AppState::default();
        let now = chrono::Utc::now().naive_utc();

        state.service_status = Some(ServiceStatus::Active {
            total_entries: 9,
            last_updated: Some(now - chrono::Duration::minutes(30)),
        });
        let subtitle = state.compute_viewmodel(24, 80).header.subtitle;
        assert_eq!(subtitle.as_deref(), Some("list: 9 entries, updated 30m ago"));

        state.service_status = Some(ServiceStatus::Active {
            total_entries: 9,
            last_updated: Some(now - chrono::Duration::hours(51)),
        });
        let subtitle = state.compute_viewmodel(24, 80).header.subtitle;
        assert_eq!(subtitle.as_deref(), Some("list: 9 entries, updated 2d ago"));
    }

    #[test]
    fn long_values_keep_their_end() {
        assert_eq!(truncate_start("abcdefghij", 8), "...fghij");
        assert_eq!(truncate_start("short", 8), "short");
        assert_eq!(format_size(2048), "2 KB");
    }
}
