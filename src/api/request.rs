//! Outbound request construction.
//!
//! Zellij's `web_request` takes a URL, verb, header map and raw body bytes, so
//! requests are built here as plain values. Multipart encoding is done by hand:
//! the body is a single `file` part, which is all the service accepts.

use super::{CheckEndpoint, Endpoints};
use crate::domain::{CapturedImage, FileInput};
use std::collections::BTreeMap;
use std::fmt;

/// A fully built check request, tagged with the ticket of the submission that
/// issued it. Every check is a `POST`.
#[derive(Clone, PartialEq, Eq)]
pub struct CheckRequest {
    /// Submission ticket; echoed back in the completion event.
    pub ticket: u64,
    pub endpoint: CheckEndpoint,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl CheckRequest {
    /// Builds a multipart upload of `file` for the file-check endpoint.
    #[must_use]
    pub fn file(ticket: u64, endpoints: &Endpoints, file: &FileInput) -> Self {
        let boundary = format!("----sanction-check-{}", uuid::Uuid::new_v4().simple());
        let body = multipart_body(&boundary, "file", file);

        let mut headers = BTreeMap::new();
        headers.insert(
            "Content-Type".to_string(),
            format!("multipart/form-data; boundary={boundary}"),
        );

        Self {
            ticket,
            endpoint: CheckEndpoint::PassportFile,
            url: endpoints.url(CheckEndpoint::PassportFile),
            headers,
            body,
        }
    }

    /// Builds the JSON image check. Only the base64 payload of the capture is
    /// sent; the data-URI prefix is stripped.
    #[must_use]
    pub fn image(ticket: u64, endpoints: &Endpoints, image: &CapturedImage) -> Self {
        let body = serde_json::json!({ "image_data": image.payload() });
        Self::json(ticket, endpoints, CheckEndpoint::PassportImage, &body)
    }

    /// Builds the JSON name check. The caller passes the already-trimmed name.
    #[must_use]
    pub fn name(ticket: u64, endpoints: &Endpoints, full_name: &str) -> Self {
        let body = serde_json::json!({ "full_name": full_name });
        Self::json(ticket, endpoints, CheckEndpoint::Name, &body)
    }

    fn json(ticket: u64, endpoints: &Endpoints, endpoint: CheckEndpoint, body: &serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            ticket,
            endpoint,
            url: endpoints.url(endpoint),
            headers,
            body: body.to_string().into_bytes(),
        }
    }

    /// Context map attached to the web request so the reply can be routed
    /// back to this submission.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert("kind".to_string(), "check".to_string());
        context.insert("ticket".to_string(), self.ticket.to_string());
        context
    }
}

impl fmt::Debug for CheckRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRequest")
            .field("ticket", &self.ticket)
            .field("endpoint", &self.endpoint)
            .field("url", &self.url)
            .field("body_len", &self.body.len())
            .finish_non_exhaustive()
    }
}

/// Encodes a single-part `multipart/form-data` body.
fn multipart_body(boundary: &str, field: &str, file: &FileInput) -> Vec<u8> {
    let filename = file.name.replace(['"', '\r', '\n'], "_");
    let head = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: {}\r\n\r\n",
        file.content_type()
    );
    let tail = format!("\r\n--{boundary}--\r\n");

    let mut body = Vec::with_capacity(head.len() + file.bytes.len() + tail.len());
    body.extend_from_slice(head.as_bytes());
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(tail.as_bytes());
    body
}
