//! Timestamp rendering in the configured display offset

use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::fmt::Write;

/// Render a UTC instant in a fixed offset. Falls back to RFC 3339 when the
/// format string is not a valid chrono format.
pub fn format_in_offset(instant: DateTime<Utc>, offset_minutes: i32, format: &str) -> String {
    let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    let local = instant.with_timezone(&offset);

    let mut rendered = String::new();
    match write!(rendered, "{}", local.format(format)) {
        Ok(()) => rendered,
        Err(_) => local.to_rfc3339(),
    }
}

/// Render a Unix timestamp (seconds). `None` if out of range.
pub fn format_timestamp(seconds: i64, offset_minutes: i32, format: &str) -> Option<String> {
    let instant = DateTime::<Utc>::from_timestamp(seconds, 0)?;
    Some(format_in_offset(instant, offset_minutes, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    const US_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

    #[test]
    fn test_format_timestamp_ist() {
        // 2023-11-14T22:13:20Z
        let rendered = format_timestamp(1700000000, 330, US_FORMAT).unwrap();
        assert_eq!(rendered, "11/15/2023, 3:43:20 AM");
    }

    #[test]
    fn test_format_timestamp_utc() {
        let rendered = format_timestamp(0, 0, "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(rendered, "1970-01-01 00:00:00");
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert!(format_timestamp(i64::MAX, 0, US_FORMAT).is_none());
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let instant = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let rendered = format_in_offset(instant, 0, "%Q");
        assert_eq!(rendered, "1970-01-01T00:00:00+00:00");
    }
}
