//! Webcam snapshots through an external capture command.
//!
//! The plugin sandbox has no camera API, so a frame is grabbed by running a
//! command on the host (via Zellij's `run_command`) that writes one JPEG to
//! stdout. By default that is `ffmpeg` reading a single frame from a V4L2
//! device; the whole command line is configurable.
//!
//! A session produces at most one image per capture action and knows nothing
//! about whether the live view is shown; that is the controller's concern.

use crate::domain::{CapturedImage, CheckError};
use std::fmt;

/// Device used by the default capture command.
pub const DEFAULT_CAMERA_DEVICE: &str = "/dev/video0";

/// JPEG start-of-image marker.
const JPEG_SOI: [u8; 2] = [0xff, 0xd8];

/// Result of running the capture command.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` if the process could not be started or was killed.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl fmt::Debug for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandOutcome")
            .field("exit_code", &self.exit_code)
            .field("stdout_len", &self.stdout.len())
            .field("stderr", &String::from_utf8_lossy(&self.stderr))
            .finish()
    }
}

/// Produces still images from the configured capture command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebcamSession {
    command: Vec<String>,
}

impl WebcamSession {
    /// Creates a session with an explicit command line.
    #[must_use]
    pub const fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    /// Creates a session grabbing one MJPEG frame from `device` with ffmpeg.
    ///
    /// ```
    /// use sanction_check::app::webcam::WebcamSession;
    ///
    /// let session = WebcamSession::for_device("/dev/video2");
    /// assert!(session.command().iter().any(|arg| arg == "/dev/video2"));
    /// ```
    #[must_use]
    pub fn for_device(device: &str) -> Self {
        let command = [
            "ffmpeg",
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "v4l2",
            "-i",
            device,
            "-frames:v",
            "1",
            "-f",
            "image2pipe",
            "-vcodec",
            "mjpeg",
            "-",
        ];
        Self::new(command.iter().map(ToString::to_string).collect())
    }

    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Turns the command outcome into a captured image.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::CameraUnavailable`] when the command failed or
    /// did not write a JPEG frame.
    pub fn finish(&self, outcome: CommandOutcome) -> Result<CapturedImage, CheckError> {
        match outcome.exit_code {
            Some(0) if outcome.stdout.starts_with(&JPEG_SOI) => {
                tracing::debug!(frame_len = outcome.stdout.len(), "camera frame received");
                Ok(CapturedImage::from_jpeg(&outcome.stdout))
            }
            Some(0) if outcome.stdout.is_empty() => {
                Err(CheckError::CameraUnavailable("camera returned no image".to_string()))
            }
            Some(0) => Err(CheckError::CameraUnavailable(
                "camera output is not a JPEG image".to_string(),
            )),
            Some(code) => Err(CheckError::CameraUnavailable(
                last_line(&outcome.stderr)
                    .unwrap_or_else(|| format!("capture command exited with status {code}")),
            )),
            None => Err(CheckError::CameraUnavailable(
                last_line(&outcome.stderr).unwrap_or_else(|| {
                    let program = self.command.first().map_or("capture command", String::as_str);
                    format!("{program} could not be started")
                }),
            )),
        }
    }
}

impl Default for WebcamSession {
    fn default() -> Self {
        Self::for_device(DEFAULT_CAMERA_DEVICE)
    }
}

/// Last non-blank stderr line, which is where ffmpeg puts the reason.
fn last_line(stderr: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(ToString::to_string)
}
