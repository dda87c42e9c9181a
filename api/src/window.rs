use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// `filter[starts_between]` precision for schedule-style queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// `filter[starts_between]` precision for the series query.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const SCHEDULE_DAYS_BACK: i64 = 10;
pub const SCHEDULE_DAYS_AHEAD: i64 = 75;
pub const TEAM_MATCHES_DAYS_BACK: i64 = 45;
pub const TEAM_MATCHES_DAYS_AHEAD: i64 = 75;
pub const SERIES_DAYS_BACK: i64 = 30;
pub const SERIES_DAYS_AHEAD: i64 = 300;

/// A span of time used to filter upstream fixture queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn around(now: DateTime<Utc>, days_back: i64, days_ahead: i64) -> Self {
        Self {
            start: now - Duration::days(days_back),
            end: now + Duration::days(days_ahead),
        }
    }

    /// Upstream caps the span of a single `starts_between` query, so wide
    /// windows are fetched as a past half and a future half.
    pub fn split_at(&self, pivot: DateTime<Utc>) -> (DateWindow, DateWindow) {
        (
            DateWindow { start: self.start, end: pivot },
            DateWindow { start: pivot, end: self.end },
        )
    }

    /// Strict on both ends.
    pub fn contains_exclusive(&self, ts: DateTime<FixedOffset>) -> bool {
        ts > self.start && ts < self.end
    }

    pub fn starts_between(&self, format: &str) -> String {
        format!(
            "filter[starts_between]={},{}",
            self.start.format(format),
            self.end.format(format)
        )
    }
}

/// Parse an upstream timestamp. Offset-less values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// "3 January 2026", in the timestamp's own offset.
pub fn display_date(ts: DateTime<FixedOffset>) -> String {
    ts.format("%-d %B %Y").to_string()
}
