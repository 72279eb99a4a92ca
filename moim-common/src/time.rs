//! Timestamp and calendar-date utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Wire format for calendar dates (`YYYY-MM-DD`)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a calendar date in ISO `YYYY-MM-DD` form
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse an ISO `YYYY-MM-DD` calendar date
///
/// Returns `None` for anything that is not a valid date in that exact form.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Convert milliseconds to duration
pub fn millis_to_duration(millis: u64) -> std::time::Duration {
    std::time::Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_format_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        assert_eq!(format_iso_date(date), "2025-08-14");
    }

    #[test]
    fn test_parse_iso_date_valid() {
        assert_eq!(
            parse_iso_date("2025-08-14"),
            NaiveDate::from_ymd_opt(2025, 8, 14)
        );
    }

    #[test]
    fn test_parse_iso_date_zero_padded() {
        assert_eq!(
            parse_iso_date("2025-01-05"),
            NaiveDate::from_ymd_opt(2025, 1, 5)
        );
    }

    #[test]
    fn test_parse_iso_date_rejects_garbage() {
        assert_eq!(parse_iso_date("not-a-date"), None);
        assert_eq!(parse_iso_date("2025/08/14"), None);
        assert_eq!(parse_iso_date("2025-13-01"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn test_millis_to_duration_one_second() {
        let duration = millis_to_duration(1000);
        assert_eq!(duration, std::time::Duration::from_secs(1));
    }
}
