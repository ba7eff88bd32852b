//! Elapsed time between issue creation and resolution

use crate::error::{Error, Result};
use chrono::{DateTime, Weekday};

/// RFC 1123 with a numeric zone, as written by the issue tracker export
pub const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// [`TIMESTAMP_FORMAT`] after the weekday prefix
const DATE_TIME_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

/// Zero-pad a single-digit day of month.
///
/// The export writes `Mon, 2 Jan 2006 ...`, which leaves a space at byte 6;
/// a `0` is inserted at byte 5 so the day is always two digits.
pub fn normalize_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.as_bytes().get(6) == Some(&b' ') && trimmed.is_char_boundary(5) {
        let mut padded = String::with_capacity(trimmed.len() + 1);
        padded.push_str(&trimmed[..5]);
        padded.push('0');
        padded.push_str(&trimmed[5..]);
        padded
    } else {
        trimmed.to_string()
    }
}

/// Parse one timestamp.
///
/// The weekday must be a valid abbreviation but is not checked against the
/// date; exports with a mismatched weekday still parse.
fn parse_timestamp(raw: &str) -> Result<DateTime<chrono::FixedOffset>> {
    let normalized = normalize_timestamp(raw);
    let parsed = match normalized.split_once(", ") {
        Some((weekday, rest)) if weekday.len() == 3 && weekday.parse::<Weekday>().is_ok() => {
            DateTime::parse_from_str(rest, DATE_TIME_FORMAT)
        }
        // Reports the grammar mismatch through chrono's own error
        _ => DateTime::parse_from_str(&normalized, TIMESTAMP_FORMAT),
    };
    parsed.map_err(|source| Error::Parse {
        value: raw.to_string(),
        source,
    })
}

/// Seconds from `created` to `resolved`.
///
/// Negative results are returned unchanged when the export is inconsistent.
pub fn compute_duration(created: &str, resolved: &str) -> Result<f64> {
    let created = parse_timestamp(created)?;
    let resolved = parse_timestamp(resolved)?;
    let elapsed = resolved.signed_duration_since(created);
    Ok(elapsed.num_milliseconds() as f64 / 1000.0)
}
