//! Input mode exclusivity.
//!
//! [`InputModeController`] owns the three candidate inputs and guarantees that
//! at most one of them is populated after every operation. Switching the mode
//! is the only way the other two are cleared, and every operation replaces the
//! whole input set in one assignment so no half-cleared state is observable.
//!
//! Clearing the check result on a mode switch is the caller's job
//! (`AppState` does it alongside each controller call).

use super::modes::{CapturePolicy, InputMode};
use crate::domain::{CapturedImage, FileInput};

/// The active input mode and its single populated input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputModeController {
    mode: InputMode,
    file: Option<FileInput>,
    capture: Option<CapturedImage>,
    name: String,
    webcam_live: bool,
    policy: CapturePolicy,
}

/// `capture()` was called while the live webcam view was off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebcamNotLive;

impl InputModeController {
    #[must_use]
    pub fn new(policy: CapturePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Selects a file: File mode, file stored, capture and name cleared,
    /// webcam view turned off.
    pub fn select_file(&mut self, file: FileInput) {
        tracing::debug!(file = ?file, "file selected");
        *self = Self {
            mode: InputMode::File,
            file: Some(file),
            capture: None,
            name: String::new(),
            webcam_live: false,
            policy: self.policy,
        };
    }

    /// Opens the live webcam view. Any previous capture, file or name is
    /// discarded.
    pub fn activate_webcam(&mut self) {
        tracing::debug!("webcam activated");
        *self = Self {
            mode: InputMode::Webcam,
            file: None,
            capture: None,
            name: String::new(),
            webcam_live: true,
            policy: self.policy,
        };
    }

    /// Closes the live webcam view. The capture survives unless the policy is
    /// [`CapturePolicy::ClearOnDeactivate`].
    pub fn deactivate_webcam(&mut self) {
        self.webcam_live = false;
        if self.policy == CapturePolicy::ClearOnDeactivate {
            self.capture = None;
        }
        tracing::debug!(policy = ?self.policy, has_capture = self.capture.is_some(), "webcam deactivated");
    }

    /// Stores a freshly captured frame, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`WebcamNotLive`] if the webcam view is off; state is left
    /// untouched.
    pub fn capture(&mut self, image: CapturedImage) -> Result<(), WebcamNotLive> {
        if !self.webcam_live {
            return Err(WebcamNotLive);
        }
        tracing::debug!(image = ?image, "frame captured");
        *self = Self {
            mode: InputMode::Webcam,
            file: None,
            capture: Some(image),
            name: String::new(),
            webcam_live: true,
            policy: self.policy,
        };
        Ok(())
    }

    /// Replaces the name text (empty allowed while editing) and clears the
    /// file and capture. The webcam view is left as it is.
    pub fn set_name(&mut self, text: String) {
        *self = Self {
            mode: InputMode::Name,
            file: None,
            capture: None,
            name: text,
            webcam_live: self.webcam_live,
            policy: self.policy,
        };
    }

    #[must_use]
    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    #[must_use]
    pub const fn file(&self) -> Option<&FileInput> {
        self.file.as_ref()
    }

    #[must_use]
    pub const fn capture_image(&self) -> Option<&CapturedImage> {
        self.capture.as_ref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn webcam_live(&self) -> bool {
        self.webcam_live
    }

    #[must_use]
    pub const fn policy(&self) -> CapturePolicy {
        self.policy
    }

    /// Number of populated inputs; never more than one.
    #[must_use]
    pub fn populated_count(&self) -> usize {
        usize::from(self.file.is_some())
            + usize::from(self.capture.is_some())
            + usize::from(!self.name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileInput {
        FileInput::new(name.into(), vec![1, 2, 3])
    }

    fn frame(tag: &str) -> CapturedImage {
        CapturedImage::from_data_uri(format!("data:image/jpeg;base64,{tag}"))
    }

    #[test]
    fn every_operation_leaves_at_most_one_input() {
        let mut controller = InputModeController::default();
        assert_eq!(controller.mode(), InputMode::None);

        let steps: Vec<Box<dyn Fn(&mut InputModeController)>> = vec![
            Box::new(|c: &mut InputModeController| c.set_name("Jane".into())),
            Box::new(|c: &mut InputModeController| c.select_file(file("a.jpg"))),
            Box::new(|c: &mut InputModeController| c.activate_webcam()),
            Box::new(|c: &mut InputModeController| {
                let _ = c.capture(frame("QQ"));
            }),
            Box::new(|c: &mut InputModeController| c.set_name("J".into())),
            Box::new(|c: &mut InputModeController| c.deactivate_webcam()),
            Box::new(|c: &mut InputModeController| c.select_file(file("b.png"))),
        ];

        for _ in 0..3 {
            for step in &steps {
                step(&mut controller);
                assert!(controller.populated_count() <= 1, "{controller:?}");
            }
        }
    }

    #[test]
    fn repeated_captures_keep_only_the_latest() {
        let mut controller = InputModeController::default();
        controller.activate_webcam();
        controller.capture(frame("AAAA")).unwrap();
        controller.capture(frame("BBBB")).unwrap();
        controller.capture(frame("CCCC")).unwrap();

        assert_eq!(controller.populated_count(), 1);
        assert_eq!(controller.capture_image().map(CapturedImage::payload), Some("CCCC"));
        assert!(controller.webcam_live());
    }

    #[test]
    fn capture_requires_live_view() {
        let mut controller = InputModeController::default();
        controller.set_name("Jane".into());
        assert_eq!(controller.capture(frame("AAAA")), Err(WebcamNotLive));
        assert_eq!(controller.name(), "Jane");
        assert_eq!(controller.mode(), InputMode::Name);
    }

    #[test]
    fn selecting_a_file_closes_the_webcam() {
        let mut controller = InputModeController::default();
        controller.activate_webcam();
        controller.capture(frame("AAAA")).unwrap();
        controller.select_file(file("passport.jpg"));

        assert_eq!(controller.mode(), InputMode::File);
        assert!(!controller.webcam_live());
        assert!(controller.capture_image().is_none());
        assert_eq!(controller.file().map(|f| f.name.as_str()), Some("passport.jpg"));
    }

    #[test]
    fn activating_the_webcam_discards_the_previous_capture() {
        let mut controller = InputModeController::default();
        controller.activate_webcam();
        controller.capture(frame("AAAA")).unwrap();
        controller.deactivate_webcam();
        controller.activate_webcam();
        assert!(controller.capture_image().is_none());
    }

    #[test]
    fn deactivation_honours_capture_policy() {
        let mut keep = InputModeController::new(CapturePolicy::KeepOnDeactivate);
        keep.activate_webcam();
        keep.capture(frame("AAAA")).unwrap();
        keep.deactivate_webcam();
        assert!(!keep.webcam_live());
        assert!(keep.capture_image().is_some());
        assert_eq!(keep.mode(), InputMode::Webcam);

        let mut clear = InputModeController::new(CapturePolicy::ClearOnDeactivate);
        clear.activate_webcam();
        clear.capture(frame("AAAA")).unwrap();
        clear.deactivate_webcam();
        assert!(clear.capture_image().is_none());
    }

    #[test]
    fn typing_a_name_clears_file_but_keeps_text_verbatim() {
        let mut controller = InputModeController::default();
        controller.select_file(file("a.jpg"));
        controller.set_name("  Jane Doe  ".into());
        assert!(controller.file().is_none());
        assert_eq!(controller.name(), "  Jane Doe  ");

        controller.set_name(String::new());
        assert_eq!(controller.mode(), InputMode::Name);
        assert_eq!(controller.populated_count(), 0);
    }
}
