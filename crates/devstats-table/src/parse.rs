//! Lenient cell parsers.
//!
//! Every parser maps a malformed or empty cell to `None` instead of failing
//! the row, so one bad value only drops out of the computations that use it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Parse a non-negative count such as `"250"` or `"250.0"`.
///
/// # Examples
///
/// ```
/// use devstats_table::parse::parse_count;
///
/// assert_eq!(parse_count("250"), Some(250));
/// assert_eq!(parse_count(" 12.0 "), Some(12));
/// assert_eq!(parse_count("-3"), None);
/// assert_eq!(parse_count("many"), None);
/// ```
pub fn parse_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    let float = raw.parse::<f64>().ok()?;
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64 {
        Some(float as u64)
    } else {
        None
    }
}

/// Parse a boolean flag written as `true/false`, `yes/no`, `t/f` or `1/0`.
///
/// # Examples
///
/// ```
/// use devstats_table::parse::parse_flag;
///
/// assert_eq!(parse_flag("True"), Some(true));
/// assert_eq!(parse_flag("0"), Some(false));
/// assert_eq!(parse_flag("maybe"), None);
/// ```
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// Parse a timestamp into a UTC date-time.
///
/// Accepts RFC 3339 (`2014-03-01T12:00:00Z`), `YYYY-MM-DD HH:MM:SS` with
/// optional fractional seconds and offset, and bare `YYYY-MM-DD`.
/// Offsets are folded into UTC.
///
/// # Examples
///
/// ```
/// use devstats_table::parse::parse_timestamp;
///
/// let ts = parse_timestamp("2014-03-01T12:00:00Z").unwrap();
/// assert_eq!(ts.to_string(), "2014-03-01 12:00:00");
///
/// let shifted = parse_timestamp("2014-03-01 12:00:00+02:00").unwrap();
/// assert_eq!(shifted.to_string(), "2014-03-01 10:00:00");
///
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.naive_utc());
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Treat empty or whitespace-only cells as absent.
fn deserialize_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_cell(deserializer)
}

pub(crate) fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_cell(deserializer)?.as_deref().and_then(parse_count))
}

pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_cell(deserializer)?.as_deref().and_then(parse_flag))
}

pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_cell(deserializer)?
        .as_deref()
        .and_then(parse_timestamp))
}
