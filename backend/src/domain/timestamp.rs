//! Lenient timestamp parsing for API payloads.
//!
//! The storefront API emits RFC 3339 timestamps, but older records carry bare
//! calendar dates (`2024-03-01`). Bare dates are read as midnight UTC.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` calendar date.
///
/// # Examples
/// ```
/// use storefront::domain::parse_timestamp;
///
/// let instant = parse_timestamp("2024-03-01").expect("bare dates parse");
/// assert_eq!(instant.to_rfc3339(), "2024-03-01T00:00:00+00:00");
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{trimmed}'"))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&instant.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case::zulu("2024-03-01T10:15:00Z", 10, 15)]
    #[case::offset("2024-03-01T12:15:00+02:00", 10, 15)]
    #[case::bare_date("2024-03-01", 0, 0)]
    fn parses_supported_forms(#[case] raw: &str, #[case] hour: u32, #[case] minute: u32) {
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 1, hour, minute, 0)
            .single()
            .expect("fixture instant");
        assert_eq!(parse_timestamp(raw), Ok(expected));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("yesterday").expect_err("free text must fail");
        assert!(err.contains("yesterday"));
    }
}
