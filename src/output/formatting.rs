//! Value formatting for reports

/// Format seconds as `[-]XhYmZs`, dropping leading zero units.
///
/// Rounds to whole seconds: `3600.0` is `1h0m0s`, `340.0` is `5m40s`,
/// `0.4` is `0s`.
pub fn format_duration(seconds: f64) -> String {
    let rounded = seconds.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let total = rounded.abs() as u64;

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{secs}s")
    } else {
        format!("{sign}{secs}s")
    }
}

/// Format an optional statistic, `n/a` when there were no samples
pub fn format_optional_duration(seconds: Option<f64>) -> String {
    seconds
        .map(format_duration)
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0s");
        assert_eq!(format_duration(0.4), "0s");
        assert_eq!(format_duration(59.0), "59s");
        assert_eq!(format_duration(340.0), "5m40s");
        assert_eq!(format_duration(3600.0), "1h0m0s");
        assert_eq!(format_duration(90061.0), "25h1m1s");
    }

    #[test]
    fn test_format_negative_duration() {
        assert_eq!(format_duration(-3600.0), "-1h0m0s");
        assert_eq!(format_duration(-5.0), "-5s");
    }

    #[test]
    fn test_format_optional_duration() {
        assert_eq!(format_optional_duration(None), "n/a");
        assert_eq!(format_optional_duration(Some(100.0)), "1m40s");
    }
}
