//! Presentation helpers for status and result views.
//!
//! Pure functions, no locale handling: output shapes match what the
//! service's advisory strings and the result view expect.

/// File size for the completed view, always in megabytes: `"10.00 MB"`.
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Duration as `m:ss`, e.g. `125` → `"2:05"`.
///
/// Minutes are not wrapped into hours: `3600` → `"60:00"`.
pub fn format_duration(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Percentage parsed from an advisory progress string such as `"42%"`.
///
/// Returns `None` when the remainder does not parse as a finite number.
pub fn parse_percent(progress: &str) -> Option<f32> {
    progress
        .trim()
        .trim_end_matches('%')
        .trim_end()
        .parse::<f32>()
        .ok()
        .filter(|percent| percent.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(10_485_760), "10.00 MB");
        assert_eq!(format_file_size(0), "0.00 MB");
        assert_eq!(format_file_size(1_572_864), "1.50 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(125), "2:05");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(60), "1:00");
        assert_eq!(format_duration(3600), "60:00");
        assert_eq!(format_duration(0), "0:00");
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("42%"), Some(42.0));
        assert_eq!(parse_percent("42.5%"), Some(42.5));
        assert_eq!(parse_percent("100%"), Some(100.0));
        assert_eq!(parse_percent(" 7% "), Some(7.0));
        assert_eq!(parse_percent("42"), Some(42.0));
    }

    #[test]
    fn test_parse_percent_rejects_junk() {
        assert_eq!(parse_percent(""), None);
        assert_eq!(parse_percent("%"), None);
        assert_eq!(parse_percent("fast"), None);
        assert_eq!(parse_percent("NaN%"), None);
    }
}
