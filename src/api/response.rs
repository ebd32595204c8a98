//! Response interpretation.
//!
//! Turns whatever came back from the transport into a [`CheckResult`]. This is
//! the network boundary: loosely shaped JSON is validated here and nowhere
//! else.
//!
//! # Mapping
//!
//! - transport failure → `Failure { <underlying description> }`
//! - non-2xx, JSON body → `Failure { body.message | body.detail | <compact body> }`
//! - non-2xx, other body → `Failure { "server error <status>" }`
//! - 2xx, `success: false` → `Failure { body.message }`
//! - 2xx, `success: true` → `Success { .. }`
//! - 2xx, unparsable → `Failure { "invalid response from server: .." }`

use crate::domain::{CheckError, CheckResult, DetailValue, MatchDetails, ServiceStatus};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Key inside `match_details` holding flagged source URLs.
const LINKS_FIELD: &str = "links";

/// What the transport delivered for one request.
#[derive(Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    /// The service answered (any status code).
    Response {
        status: u16,
        body: Vec<u8>,
    },
    /// No response at all: DNS failure, refused connection, sandbox denial.
    Failed {
        reason: String,
    },
}

impl TransportOutcome {
    const fn is_success(status: u16) -> bool {
        status >= 200 && status < 300
    }
}

impl fmt::Debug for TransportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response { status, body } => f
                .debug_struct("Response")
                .field("status", status)
                .field("body_len", &body.len())
                .finish(),
            Self::Failed { reason } => f.debug_struct("Failed").field("reason", reason).finish(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CheckResponseBody {
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    match_found: bool,
    #[serde(default)]
    match_details: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct StatusResponseBody {
    status: String,
    #[serde(default)]
    total_entries: Option<u64>,
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Maps the outcome of a check request to a [`CheckResult`].
///
/// ```
/// use sanction_check::api::{interpret_check_response, TransportOutcome};
/// use sanction_check::domain::CheckResult;
///
/// let outcome = TransportOutcome::Response {
///     status: 429,
///     body: br#"{"detail":"rate limited"}"#.to_vec(),
/// };
/// assert_eq!(interpret_check_response(&outcome), CheckResult::failure("rate limited"));
/// ```
#[must_use]
pub fn interpret_check_response(outcome: &TransportOutcome) -> CheckResult {
    match outcome {
        TransportOutcome::Failed { reason } => {
            tracing::debug!(reason = %reason, "check request failed in transport");
            CheckError::Transport(reason.clone()).into()
        }
        TransportOutcome::Response { status, body } if !TransportOutcome::is_success(*status) => {
            let message = error_message(body);
            tracing::debug!(status = status, has_message = message.is_some(), "check rejected by service");
            CheckError::server(*status, message).into()
        }
        TransportOutcome::Response { body, .. } => match serde_json::from_slice::<CheckResponseBody>(body) {
            Ok(parsed) => success_body_to_result(parsed),
            Err(e) => {
                tracing::debug!(error = %e, "unparsable check response");
                CheckError::InvalidResponse(e.to_string()).into()
            }
        },
    }
}

/// Maps the outcome of the status probe to a [`ServiceStatus`].
#[must_use]
pub fn interpret_status_response(outcome: &TransportOutcome) -> ServiceStatus {
    let TransportOutcome::Response { status, body } = outcome else {
        return ServiceStatus::Unreachable;
    };
    if !TransportOutcome::is_success(*status) {
        return ServiceStatus::Unreachable;
    }

    match serde_json::from_slice::<StatusResponseBody>(body) {
        Ok(parsed) if parsed.status == "active" => ServiceStatus::Active {
            total_entries: parsed.total_entries.unwrap_or(0),
            last_updated: parsed
                .last_updated
                .as_deref()
                .and_then(|s| s.parse::<NaiveDateTime>().ok()),
        },
        Ok(parsed) => ServiceStatus::Degraded {
            message: parsed.message.unwrap_or(parsed.status),
        },
        Err(e) => {
            tracing::debug!(error = %e, "unparsable status response");
            ServiceStatus::Unreachable
        }
    }
}

fn success_body_to_result(body: CheckResponseBody) -> CheckResult {
    if !body.success {
        return CheckResult::failure(body.message);
    }

    let (match_details, flagged_links) = match body.match_details {
        Some(Value::Object(map)) => split_match_details(map),
        _ => (None, None),
    };

    CheckResult::Success {
        message: body.message,
        match_found: body.match_found,
        match_details,
        flagged_links,
    }
}

/// Separates the `links` field from the generic detail fields.
fn split_match_details(map: Map<String, Value>) -> (Option<MatchDetails>, Option<Vec<String>>) {
    let mut links = None;
    let mut fields = Vec::with_capacity(map.len());

    for (key, value) in map {
        if key == LINKS_FIELD {
            if let Value::Array(items) = value {
                links = Some(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(url) => Some(url),
                            _ => None,
                        })
                        .collect(),
                );
            }
            continue;
        }
        fields.push((key, detail_value(value)));
    }

    (Some(MatchDetails::new(fields)), links)
}

fn detail_value(value: Value) -> DetailValue {
    match value {
        Value::Null => DetailValue::Missing,
        Value::Array(items) => DetailValue::List(
            items
                .into_iter()
                .filter(|item| !item.is_null())
                .map(scalar_text)
                .collect(),
        ),
        other => DetailValue::Text(scalar_text(other)),
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Extracts a message from an error body: `message`, then `detail`, then the
/// whole JSON body re-serialized compactly. `None` if the body is not JSON.
fn error_message(body: &[u8]) -> Option<String> {
    let parsed = serde_json::from_slice::<Value>(body).ok()?;

    let non_empty = |value: &Value| match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    };

    let field = |name: &str| parsed.get(name).and_then(non_empty);
    Some(
        field("message")
            .or_else(|| field("detail"))
            .unwrap_or_else(|| parsed.to_string()),
    )
}
