//! Parsing of the wall-clock strings carried by source entities.
//!
//! Dates are `YYYY-MM-DD`; deadlines may also carry a time part
//! (`2024-03-01T17:00:00`, with or without an offset), which is dropped.
//! Times are 24-hour `HH:mm`, with optional seconds.

use crate::error::{Result, ScheduleError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| ScheduleError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Parse a deadline, accepting a bare date or an ISO 8601 datetime.
///
/// Only the calendar date matters for placement; for RFC 3339 values the
/// local date written in the string is kept rather than converting offsets.
pub fn parse_deadline(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if let Ok(date) = parse_date(trimmed) {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local().date());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map(|ndt| ndt.date())
        .map_err(|e| ScheduleError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Parse an `HH:mm` (or `HH:mm:ss`) time of day.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| ScheduleError::InvalidTime(format!("'{}': {}", s, e)))
}

/// Parse an optional time field; absent stays absent, malformed is an error.
pub fn parse_optional_time(s: Option<&str>) -> Result<Option<NaiveTime>> {
    s.map(parse_time).transpose()
}

/// Serde adapter writing `Option<NaiveTime>` as `"HH:mm"`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.as_deref()
            .map(super::parse_time)
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
