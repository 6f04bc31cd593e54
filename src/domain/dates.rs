use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse an upstream date into site-local civil time.
///
/// RFC 3339 values keep their own wall-clock reading, so
/// `2025-06-14T00:00:00+02:00` and `2025-06-14T00:00:00Z` both land on
/// June 14th at midnight.
pub fn parse_date(date_str: &str) -> Result<NaiveDateTime> {
    let trimmed = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, DATE_TIME_FORMAT) {
        return Ok(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    anyhow::bail!("Failed to parse tournament date: {}", date_str)
}

pub fn format_date(date: &NaiveDateTime) -> String {
    date.format(DATE_TIME_FORMAT).to_string()
}

/// Serde adapter for `NaiveDateTime` fields carried as upstream date strings.
pub mod serde_date {
    use super::*;

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_date(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
