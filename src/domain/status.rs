//! Sanctions list status reported by the service.
//!
//! The service exposes `GET /sanctions-status/`, returning either
//! `{status: "active", total_entries, last_updated}` or
//! `{status: "error", message}`. The plugin shows it in the header so the user
//! knows how fresh the list being checked against is.

use chrono::NaiveDateTime;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Health of the remote sanctions list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    /// The list is loaded.
    Active {
        /// Number of sanctioned persons in the list.
        total_entries: u64,
        /// When the list file was last rebuilt, in service-local time.
        last_updated: Option<NaiveDateTime>,
    },
    /// The service reported a problem with its list.
    Degraded {
        /// Message from the service.
        message: String,
    },
    /// The status endpoint could not be reached or answered garbage.
    Unreachable,
}

impl ServiceStatus {
    /// One-line summary for the header.
    ///
    /// ```
    /// use sanction_check::domain::ServiceStatus;
    ///
    /// let status = ServiceStatus::Active { total_entries: 1200, last_updated: None };
    /// assert_eq!(status.summary(chrono::Utc::now().naive_utc()), "list: 1200 entries");
    /// ```
    #[must_use]
    pub fn summary(&self, now: NaiveDateTime) -> String {
        match self {
            Self::Active {
                total_entries,
                last_updated: Some(updated),
            } => format!("list: {total_entries} entries, updated {}", time_ago(*updated, now)),
            Self::Active {
                total_entries,
                last_updated: None,
            } => format!("list: {total_entries} entries"),
            Self::Degraded { message } => format!("list unavailable: {message}"),
            Self::Unreachable => "service unreachable".to_string(),
        }
    }
}

/// Formats the distance between `then` and `now` as "just now", "5m ago",
/// "3h ago" or "7d ago".
fn time_ago(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = (now - then).num_seconds();

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn summary_reports_age_of_list() {
        let updated = at("2026-10-16T08:00:00");
        let status = ServiceStatus::Active {
            total_entries: 42,
            last_updated: Some(updated),
        };
        assert_eq!(
            status.summary(updated + Duration::days(3)),
            "list: 42 entries, updated 3d ago"
        );
        assert_eq!(
            status.summary(updated + Duration::minutes(5)),
            "list: 42 entries, updated 5m ago"
        );
        assert_eq!(status.summary(updated), "list: 42 entries, updated just now");
    }

    #[test]
    fn degraded_and_unreachable_summaries() {
        let now = at("2026-10-19T00:00:00");
        let degraded = ServiceStatus::Degraded {
            message: "pickle missing".into(),
        };
        assert_eq!(degraded.summary(now), "list unavailable: pickle missing");
        assert_eq!(ServiceStatus::Unreachable.summary(now), "service unreachable");
    }
}
