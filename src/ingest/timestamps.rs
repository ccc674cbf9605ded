use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse an export timestamp. Naive values are taken as UTC.
///
/// Returns `None` for blank or unrecognized values; callers treat those as
/// "no commit date".
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Salesforce style offsets without a colon, e.g. 2024-01-10T08:00:00.000+0000
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn parses_iso_date_only() {
        assert_eq!(parse_timestamp("2024-01-10"), Some(utc(2024, 1, 10, 0, 0, 0)));
    }

    #[test]
    fn parses_rfc3339_and_converts_offset() {
        assert_eq!(
            parse_timestamp("2024-01-10T10:00:00+02:00"),
            Some(utc(2024, 1, 10, 8, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-10T08:00:00.000+0000"),
            Some(utc(2024, 1, 10, 8, 0, 0))
        );
    }

    #[test]
    fn parses_naive_datetimes() {
        assert_eq!(
            parse_timestamp("2024-01-10 08:30:15"),
            Some(utc(2024, 1, 10, 8, 30, 15))
        );
        assert_eq!(
            parse_timestamp("2024-01-10 08:30"),
            Some(utc(2024, 1, 10, 8, 30, 0))
        );
    }

    #[test]
    fn parses_us_style_dates() {
        assert_eq!(parse_timestamp("01/05/2024"), Some(utc(2024, 1, 5, 0, 0, 0)));
        assert_eq!(
            parse_timestamp("01/05/2024 03:15 PM"),
            Some(utc(2024, 1, 5, 15, 15, 0))
        );
    }

    #[test]
    fn blank_and_garbage_are_absent() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
