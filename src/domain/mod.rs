//! Domain layer for the sanction-check plugin.
//!
//! Core types with no dependency on Zellij or the network:
//!
//! - [`error`]: infrastructure errors and user-visible check errors
//! - [`input`]: uploaded files and captured webcam frames
//! - [`result`]: compliance check results and match details
//! - [`status`]: sanctions list status shown in the header

pub mod error;
pub mod input;
pub mod result;
pub mod status;

pub use error::{CheckError, CheckerError, Result};
pub use input::{CapturedImage, FileInput};
pub use result::{CheckResult, DetailValue, MatchDetails};
pub use status::ServiceStatus;
