//! Deserializers for request bodies.
//!
//! Patch commands use `Option<Option<T>>` so that an absent key (`None`) can be told
//! apart from an explicit `null` (`Some(None)`). Pair these with `#[serde(default)]`.
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{de::Error, Deserialize, Deserializer};

pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (midnight UTC).
/// `null` and `""` both mean no date.
pub fn flexible_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_date(&raw).map_err(D::Error::custom),
    }
}

pub fn nullable_flexible_date<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    flexible_date(deserializer).map(Some)
}

fn parse_date(raw: &str) -> Result<Option<DateTime<Utc>>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| Some(date.and_time(NaiveTime::MIN).and_utc()))
        .map_err(|e| format!(r#"cannot parse date from "{raw}": {e}"#))
}
