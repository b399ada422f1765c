//! The `[start, end]` range both feeds are asked for.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// How far back the window reaches, in days.
pub(crate) const DAYS_BACK: i64 = 1;
/// How far ahead the window reaches, in days.
pub(crate) const DAYS_FORWARD: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeWindow {
    pub(crate) start: DateTime<Utc>,
    pub(crate) end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window from [DAYS_BACK] before `now` to [DAYS_FORWARD] after it.
    pub(crate) fn around(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(DAYS_BACK),
            end: now + Duration::days(DAYS_FORWARD),
        }
    }

    /// Start as `2024-03-09T12:00:00.000Z`.
    pub(crate) fn start_millis(&self) -> String {
        iso_millis(self.start)
    }

    /// End as `2024-03-12T12:00:00.000Z`.
    pub(crate) fn end_millis(&self) -> String {
        iso_millis(self.end)
    }

    /// Start as `2024-03-09T12:00:00Z`, fractional seconds dropped.
    pub(crate) fn start_secs(&self) -> String {
        iso_secs(self.start)
    }

    /// End as `2024-03-12T12:00:00Z`, fractional seconds dropped.
    pub(crate) fn end_secs(&self) -> String {
        iso_secs(self.end)
    }
}

/// ISO-8601 in UTC with millisecond precision and a `Z` suffix.
pub(crate) fn iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn iso_secs(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
