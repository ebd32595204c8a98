//! Error types for the sanction-check plugin.
//!
//! Two families live here:
//!
//! - [`CheckerError`]: infrastructure failures such as I/O, theme loading,
//!   worker communication and payload decoding. These are logged and never
//!   shown as a check result.
//! - [`CheckError`]: failures of a compliance check as the user sees them. Every
//!   variant's `Display` output becomes the message of a
//!   [`CheckResult::Failure`](crate::domain::CheckResult::Failure).

use thiserror::Error;

/// Infrastructure error for plugin operations.
///
/// # Examples
///
/// ```
/// use sanction_check::domain::CheckerError;
///
/// fn load_theme() -> Result<(), CheckerError> {
///     Err(CheckerError::Theme("missing [colors] table".to_string()))
/// }
/// assert_eq!(
///     load_theme().unwrap_err().to_string(),
///     "Theme error: missing [colors] table"
/// );
/// ```
#[derive(Debug, Error)]
pub enum CheckerError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// A payload crossing a thread or process boundary could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A specialized `Result` type for plugin operations.
pub type Result<T> = std::result::Result<T, CheckerError>;

/// Why a compliance check did not produce a match result.
///
/// The variants follow the order in which a submission can fail: rejected
/// locally, lost in transit, refused by the service, or answered with garbage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// Nothing to submit for the active input mode. Resolved locally; never
    /// reaches the network.
    #[error("{0}")]
    Validation(String),

    /// The request could not complete (no response at all).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status code.
    #[error("{message}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Message taken from the error body, or the generic fallback.
        message: String,
    },

    /// The service answered 2xx with a body that is not a check response.
    #[error("invalid response from server: {0}")]
    InvalidResponse(String),

    /// A submit arrived while another check was still in flight.
    #[error("a check is already in progress")]
    AlreadyInProgress,

    /// The camera could not produce a frame.
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    /// The selected file could not be read.
    #[error("could not read {path}: {reason}")]
    FileUnreadable {
        /// Path as the user typed it.
        path: String,
        /// Underlying failure description.
        reason: String,
    },
}

impl CheckError {
    /// Builds a server error, falling back to `"server error <status>"` when
    /// no structured message could be extracted from the body.
    #[must_use]
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server {
            status,
            message: message.unwrap_or_else(|| format!("server error {status}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_falls_back_to_generic_message() {
        assert_eq!(CheckError::server(502, None).to_string(), "server error 502");
        assert_eq!(
            CheckError::server(429, Some("rate limited".into())).to_string(),
            "rate limited"
        );
    }

    #[test]
    fn camera_and_file_errors_name_their_cause() {
        let camera = CheckError::CameraUnavailable("no such device".into());
        assert_eq!(camera.to_string(), "camera unavailable: no such device");

        let file = CheckError::FileUnreadable {
            path: "~/scan.png".into(),
            reason: "file is empty".into(),
        };
        assert_eq!(file.to_string(), "could not read ~/scan.png: file is empty");
    }
}
