//! Timestamp parsing and display helpers
//!
//! The backend serializes Java `LocalDateTime` values without an offset
//! (`2024-01-01T10:30:00`), while other producers send full RFC 3339 strings.
//! Offset-less values are interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a backend timestamp.
///
/// Accepts RFC 3339, offset-less ISO date-times (seconds optional fraction),
/// bare `YYYY-MM-DD` dates (midnight UTC) and integer epoch milliseconds.
///
/// # Returns
///
/// * `Some(DateTime<Utc>)` - The parsed instant
/// * `None` - If the string is blank or matches none of the formats
///
/// # Examples
///
/// ```
/// use taskdash_domain::utils::time::parse_timestamp;
///
/// let a = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
/// let b = parse_timestamp("2024-01-01T00:00:00").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    if let Some(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(date.and_utc());
    }

    raw.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}

/// Long display form, e.g. `Jan 5, 2024 at 3:07 PM`.
#[must_use]
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y at %-I:%M %p").to_string()
}

/// Relative display form, e.g. `3 hours ago` or `in 2 days`.
///
/// Thresholds follow the usual "from now" buckets: under 45 seconds is
/// "a few seconds", under 90 seconds "a minute", under 45 minutes counts
/// minutes, under 90 minutes "an hour", under 22 hours counts hours, under
/// 36 hours "a day", under 26 days counts days, under 46 days "a month",
/// under 320 days counts months, under 548 days "a year", then years.
///
/// # Arguments
///
/// * `timestamp` - The instant being described
/// * `now` - Reference instant
#[must_use]
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(timestamp).num_seconds();
    let phrase = relative_phrase(delta.unsigned_abs());

    if delta < 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn relative_phrase(seconds: u64) -> String {
    let secs = seconds as f64;
    let round = |value: f64| value.round() as u64;

    if secs < 45.0 {
        return "a few seconds".to_string();
    }
    if secs < 90.0 {
        return "a minute".to_string();
    }

    let minutes = round(secs / 60.0);
    if minutes < 45 {
        return format!("{minutes} minutes");
    }
    if minutes < 90 {
        return "an hour".to_string();
    }

    let hours = round(secs / 3_600.0);
    if hours < 22 {
        return format!("{hours} hours");
    }
    if hours < 36 {
        return "a day".to_string();
    }

    let days = round(secs / 86_400.0);
    if days < 26 {
        return format!("{days} days");
    }
    if days < 46 {
        return "a month".to_string();
    }
    if days < 320 {
        return format!("{} months", round(days as f64 / 30.4).max(2));
    }
    if days < 548 {
        return "a year".to_string();
    }

    format!("{} years", round(days as f64 / 365.0).max(2))
}
