use chrono::prelude::*;
use serde::{Deserialize, Serialize};

/// A due date as it arrives from the assignment store. Upstream collaborators
/// write either a native timestamp (millis) or a string, so both shapes are
/// accepted and normalized with `DueAt::timestamp_millis` before any comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DueAt {
    Millis(i64),
    Text(String),
}

impl DueAt {
    /// Normalized due timestamp in millis, or `None` when the raw value does not
    /// describe a valid instant. An invalid due date is never treated as "now".
    pub fn timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Millis(millis) => datetime_from_millis(*millis).map(|d| d.timestamp_millis()),
            Self::Text(raw) => parse_datetime(raw).map(|d| d.timestamp_millis()),
        }
    }
}

impl From<i64> for DueAt {
    fn from(millis: i64) -> Self {
        Self::Millis(millis)
    }
}

impl From<&str> for DueAt {
    fn from(raw: &str) -> Self {
        Self::Text(raw.to_string())
    }
}

pub fn datetime_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC)
/// or a plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&date));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|date| Utc.from_utc_datetime(&date));
    }
    None
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
pub fn format_iso(millis: i64) -> String {
    match datetime_from_millis(millis) {
        Some(date) => date.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => millis.to_string(),
    }
}
