//! Serde adapter for timestamps stored as fixed-width UTC strings.
//!
//! Every value is written as RFC 3339 with millisecond precision and a `Z`
//! suffix (`2024-03-01T00:00:00.000Z`). Because the width never varies,
//! `$gte`/`$lt` comparisons on the stored strings order chronologically, so
//! range filters are built with [`format`].
//!
//! Use it with `#[serde(with = "database::mongodb::timestamp")]`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// The stored form of `value`.
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse user or stored input into a UTC instant.
///
/// Accepts RFC 3339 with any offset, a local date-time without offset
/// (`2024-03-01T14:00[:00[.000]]`, read as UTC) and a bare date (UTC midnight).
pub fn parse(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(value) = DateTime::parse_from_rfc3339(input) {
        return Some(value.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Stamped {
        #[serde(with = "super")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_format_is_fixed_width() {
        let a = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format(&a), "2024-03-01T00:00:00.000Z");
        assert_eq!(format(&a).len(), format(&b).len());
        assert!(format(&a) < format(&b));
    }

    #[test]
    fn test_parse_accepts_common_inputs() {
        let midnight = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
        assert_eq!(parse("2024-05-10"), Some(midnight));
        assert_eq!(parse("2024-05-10T00:00:00.000Z"), Some(midnight));
        assert_eq!(parse("2024-05-10T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse(" 2024-05-10T00:00 "), Some(midnight));
        assert_eq!(parse("2024-05-10T00:00:00"), Some(midnight));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("tomorrow"), None);
        assert_eq!(parse("2024-13-01"), None);
    }

    #[test]
    fn test_serde_round_trip_through_json() {
        let value = Stamped {
            at: Utc.with_ymd_and_hms(2024, 7, 4, 15, 30, 0).unwrap(),
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"at":"2024-07-04T15:30:00.000Z"}"#);
        let back: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_deserialize_invalid_value() {
        let result = serde_json::from_str::<Stamped>(r#"{"at":"nope"}"#);
        assert!(result.is_err());
    }
}
