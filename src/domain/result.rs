//! Compliance check results.
//!
//! A [`CheckResult`] is produced exactly once per completed submission and is
//! never patched afterwards. Match details arrive as loosely shaped JSON; they
//! are validated into [`MatchDetails`] at the network boundary (see
//! [`crate::api::response`]) so nothing downstream touches raw JSON.

use crate::domain::error::CheckError;

/// Outcome of one compliance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// The check could not be completed.
    Failure {
        /// Human-readable reason.
        message: String,
    },

    /// The service processed the input.
    Success {
        /// Service message, e.g. "Successfully checked name: Jane Doe".
        message: String,
        /// Whether the input matched a sanctions list entry.
        match_found: bool,
        /// Fields describing the matched entry, without `links`.
        match_details: Option<MatchDetails>,
        /// Supplementary source URLs flagged for the matched entry.
        flagged_links: Option<Vec<String>>,
    },
}

impl CheckResult {
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Failure { message } | Self::Success { message, .. } => message,
        }
    }
}

impl From<CheckError> for CheckResult {
    fn from(error: CheckError) -> Self {
        Self::failure(error.to_string())
    }
}

/// One value inside `match_details`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailValue {
    /// A scalar rendered as text (strings, numbers, booleans, nested objects).
    Text(String),
    /// A sequence of scalars, rendered joined.
    List(Vec<String>),
    /// JSON `null`.
    Missing,
}

/// Match detail fields in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchDetails {
    fields: Vec<(String, DetailValue)>,
}

impl MatchDetails {
    #[must_use]
    pub const fn new(fields: Vec<(String, DetailValue)>) -> Self {
        Self { fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetailValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DetailValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_errors_convert_into_failures() {
        let result: CheckResult = CheckError::server(500, None).into();
        assert_eq!(result, CheckResult::failure("server error 500"));
        assert!(!result.is_success());
        assert_eq!(result.message(), "server error 500");
    }

    #[test]
    fn match_details_keep_insertion_order() {
        let details = MatchDetails::new(vec![
            ("name".into(), DetailValue::Text("Jane Doe".into())),
            ("aliases".into(), DetailValue::List(vec!["J. Doe".into()])),
        ]);
        let keys: Vec<&str> = details.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["name", "aliases"]);
        assert_eq!(details.get("aliases"), Some(&DetailValue::List(vec!["J. Doe".into()])));
        assert_eq!(details.len(), 2);
    }
}
