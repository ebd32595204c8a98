//! Maps a check result to what the result panel shows.
//!
//! [`present`] is a pure function of the current result, the submission state
//! and the flagged-links toggle. It does no formatting of terminal output; the
//! result panel component renders the [`ResultView`] it returns.

use crate::app::modes::SubmissionState;
use crate::domain::{CheckResult, DetailValue, MatchDetails};

pub const ERROR_HEADLINE: &str = "Error";
pub const UNKNOWN_ERROR_BODY: &str = "An unknown error occurred.";
pub const DEFAULT_SUCCESS_HEADLINE: &str = "Processing Result";
pub const NO_MATCH_BODY: &str = "no matches found";
pub const MATCH_BODY: &str = "match found";

const MISSING_VALUE: &str = "n/a";
const LIST_DELIMITER: &str = ", ";

/// Colour family of the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Error,
    Success,
}

/// The collapsible list of flagged source URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedLinksSection {
    pub collapsed: bool,
    pub links: Vec<String>,
}

/// Display structure for the result panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    pub visible: bool,
    pub tone: Tone,
    pub headline: String,
    pub body: String,
    /// `(label, value)` pairs in the order the service sent them.
    pub match_details: Option<Vec<(String, String)>>,
    pub flagged_links: Option<FlaggedLinksSection>,
}

impl ResultView {
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Builds the result panel for the current state.
///
/// ```
/// use sanction_check::app::modes::SubmissionState;
/// use sanction_check::domain::CheckResult;
/// use sanction_check::ui::presenter::{present, Tone};
///
/// let view = present(Some(&CheckResult::failure("")), SubmissionState::Idle, true);
/// assert_eq!(view.tone, Tone::Error);
/// assert_eq!(view.body, "An unknown error occurred.");
/// ```
#[must_use]
pub fn present(
    result: Option<&CheckResult>,
    submission: SubmissionState,
    links_collapsed: bool,
) -> ResultView {
    let Some(result) = result else {
        return ResultView::hidden();
    };
    if submission.is_in_flight() {
        return ResultView::hidden();
    }

    match result {
        CheckResult::Failure { message } => ResultView {
            visible: true,
            tone: Tone::Error,
            headline: ERROR_HEADLINE.to_string(),
            body: non_blank_or(message, UNKNOWN_ERROR_BODY),
            match_details: None,
            flagged_links: None,
        },
        CheckResult::Success {
            message,
            match_found: false,
            ..
        } => ResultView {
            visible: true,
            tone: Tone::Success,
            headline: non_blank_or(message, DEFAULT_SUCCESS_HEADLINE),
            body: NO_MATCH_BODY.to_string(),
            match_details: None,
            flagged_links: None,
        },
        CheckResult::Success {
            message,
            match_found: true,
            match_details,
            flagged_links,
        } => ResultView {
            visible: true,
            tone: Tone::Success,
            headline: non_blank_or(message, DEFAULT_SUCCESS_HEADLINE),
            body: MATCH_BODY.to_string(),
            match_details: match_details
                .as_ref()
                .filter(|details| !details.is_empty())
                .map(detail_rows),
            flagged_links: flagged_links
                .as_ref()
                .filter(|links| !links.is_empty())
                .map(|links| FlaggedLinksSection {
                    collapsed: links_collapsed,
                    links: links.clone(),
                }),
        },
    }
}

fn detail_rows(details: &MatchDetails) -> Vec<(String, String)> {
    details
        .iter()
        .map(|(key, value)| (key.replace('_', " "), detail_text(value)))
        .collect()
}

fn detail_text(value: &DetailValue) -> String {
    match value {
        DetailValue::Text(text) => text.clone(),
        DetailValue::List(items) if items.is_empty() => MISSING_VALUE.to_string(),
        DetailValue::List(items) => items.join(LIST_DELIMITER),
        DetailValue::Missing => MISSING_VALUE.to_string(),
    }
}

fn non_blank_or(text: &str, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(links: Option<Vec<String>>) -> CheckResult {
        CheckResult::Success {
            message: "Successfully checked name: Jane Doe".into(),
            match_found: true,
            match_details: Some(MatchDetails::new(vec![
                ("full_name".into(), DetailValue::Text("JANE DOE".into())),
                (
                    "known_aliases".into(),
                    DetailValue::List(vec!["J. Doe".into(), "Janet D".into()]),
                ),
                ("date_of_birth".into(), DetailValue::Missing),
            ])),
            flagged_links: links,
        }
    }

    #[test]
    fn nothing_to_show_without_a_result() {
        assert!(!present(None, SubmissionState::Idle, true).visible);
        assert!(
            !present(
                Some(&CheckResult::failure("x")),
                SubmissionState::InFlight { ticket: 3 },
                true
            )
            .visible
        );
    }

    #[test]
    fn match_details_are_labelled_and_joined() {
        let view = present(Some(&matched(None)), SubmissionState::Idle, true);
        assert_eq!(view.tone, Tone::Success);
        assert_eq!(view.headline, "Successfully checked name: Jane Doe");
        assert_eq!(view.body, MATCH_BODY);
        assert_eq!(
            view.match_details,
            Some(vec![
                ("full name".to_string(), "JANE DOE".to_string()),
                ("known aliases".to_string(), "J. Doe, Janet D".to_string()),
                ("date of birth".to_string(), "n/a".to_string()),
            ])
        );
        assert_eq!(view.flagged_links, None);
    }

    #[test]
    fn no_match_suppresses_details_and_links() {
        let result = CheckResult::Success {
            message: String::new(),
            match_found: false,
            match_details: Some(MatchDetails::new(vec![(
                "name".into(),
                DetailValue::Text("ignored".into()),
            )])),
            flagged_links: Some(vec!["http://a".into()]),
        };
        let view = present(Some(&result), SubmissionState::Idle, false);
        assert_eq!(view.headline, DEFAULT_SUCCESS_HEADLINE);
        assert_eq!(view.body, NO_MATCH_BODY);
        assert!(view.match_details.is_none());
        assert!(view.flagged_links.is_none());
    }

    #[test]
    fn links_follow_the_toggle() {
        let result = matched(Some(vec!["http://a".into(), "http://b".into()]));

        let collapsed = present(Some(&result), SubmissionState::Idle, true);
        let expanded = present(Some(&result), SubmissionState::Idle, false);

        assert_eq!(
            collapsed.flagged_links,
            Some(FlaggedLinksSection {
                collapsed: true,
                links: vec!["http://a".into(), "http://b".into()],
            })
        );
        assert_eq!(expanded.flagged_links.map(|s| s.collapsed), Some(false));
        assert_eq!(collapsed.match_details, expanded.match_details);
        assert_eq!(collapsed.headline, expanded.headline);
    }

    #[test]
    fn empty_link_list_has_no_section() {
        let view = present(Some(&matched(Some(vec![]))), SubmissionState::Idle, true);
        assert!(view.flagged_links.is_none());
    }
}
