// Wire formats shared by the gathering payloads

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Event times go out as `HH:MM`; `HH:MM:SS` is accepted on the way in
/// because that is how Postgres renders a TIME column.
pub mod hour_minute {
    use super::*;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw).map_err(serde::de::Error::custom)
    }

    /// Same as above for patch payloads where the field may be missing
    pub mod option {
        use super::*;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => parse_time(&raw).map(Some).map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{}', expected HH:MM", raw))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", raw))
}

/// Optional calendar day where an empty string means "no date".
pub fn blank_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Patch form of [`blank_date`]: a missing key stays `None` (via
/// `#[serde(default)]`), while `null` or `""` become `Some(None)` and clear it.
pub fn patch_blank_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Option<NaiveDate>>, D::Error> {
    blank_date(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_time_shapes() {
        assert_eq!(parse_time("20:00").unwrap(), NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(parse_time("18:30:00").unwrap(), NaiveTime::from_hms_opt(18, 30, 0).unwrap());
        assert!(parse_time("8pm").is_err());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("31/12/2025").is_err());
        assert_eq!(parse_date(" 2025-12-31 ").unwrap(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }
}
