//! Wire contract of the remote compliance-check service.
//!
//! The service exposes three check operations and a status probe:
//!
//! | Operation        | Path                       | Body                       |
//! |------------------|----------------------------|----------------------------|
//! | check-by-file    | `/check-passport-file/`    | multipart, field `file`    |
//! | check-by-image   | `/check-passport-base64/`  | JSON `{image_data}`        |
//! | check-by-name    | `/check-name/`             | JSON `{full_name}`         |
//! | status           | `/sanctions-status/`       | none (`GET`)               |
//!
//! This module only builds request values and interprets response values. It
//! never performs I/O: requests are handed to the plugin shim as
//! [`Action`](crate::app::Action)s and replies come back as events.
//!
//! - [`request`]: outbound request construction (multipart and JSON bodies)
//! - [`response`]: response interpretation into [`CheckResult`](crate::domain::CheckResult)

pub mod request;
pub mod response;

pub use request::CheckRequest;
pub use response::{interpret_check_response, interpret_status_response, TransportOutcome};

/// Service base address used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// The three check operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckEndpoint {
    /// Multipart upload of a passport image file.
    PassportFile,
    /// Base64 passport image captured from the webcam.
    PassportImage,
    /// Full name lookup.
    Name,
}

impl CheckEndpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::PassportFile => "/check-passport-file/",
            Self::PassportImage => "/check-passport-base64/",
            Self::Name => "/check-name/",
        }
    }
}

/// Resolves operation paths against the configured base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Creates endpoints for a base address; trailing slashes are dropped.
    ///
    /// ```
    /// use sanction_check::api::{CheckEndpoint, Endpoints};
    ///
    /// let endpoints = Endpoints::new("https://checker.example.com/");
    /// assert_eq!(
    ///     endpoints.url(CheckEndpoint::Name),
    ///     "https://checker.example.com/check-name/"
    /// );
    /// ```
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn url(&self, endpoint: CheckEndpoint) -> String {
        format!("{}{}", self.base, endpoint.path())
    }

    #[must_use]
    pub fn status_url(&self) -> String {
        format!("{}/sanctions-status/", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
