//! Shared utility functions for DCA crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};

    /// Canonical calendar format used for every date leaving the series.
    pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

    /// Calendar-only layouts accepted for free-text dates, tried in order.
    const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%m-%d-%Y",
        "%b %d, %Y",
        "%b %d %Y",
        "%d %b %Y",
        "%d-%b-%Y",
        "%B %d, %Y",
        "%B %d %Y",
        "%d %B %Y",
    ];

    /// Date-time layouts; the time of day is dropped after parsing.
    const DATE_TIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(CANONICAL_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), CANONICAL_FORMAT)?)
    }

    /// Parse a loosely formatted date as typed into a spreadsheet cell.
    ///
    /// Accepts ISO dates, slash and dash separated US dates, month names
    /// (`Jan 5, 2023`, `5 January 2023`), ISO date-times and RFC 3339
    /// timestamps. Returns `None` when nothing matches.
    pub fn parse_free_text(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .or_else(|| {
                DATE_TIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    /// Convert a spreadsheet date serial (1900 date system) to a calendar date.
    ///
    /// Serial 1 is 1900-01-01. Serials from 61 on are offset by one day to
    /// absorb the phantom 1900-02-29, so 60 and 61 both land on 1900-03-01.
    /// The fractional (time of day) part is ignored.
    pub fn from_serial(serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() || serial < 0.0 {
            return None;
        }
        let days = serial.floor() as i64;
        let epoch = if days < 61 {
            NaiveDate::from_ymd_opt(1899, 12, 31)?
        } else {
            NaiveDate::from_ymd_opt(1899, 12, 30)?
        };
        epoch.checked_add_signed(TimeDelta::try_days(days)?)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_date_rejects_garbage() {
            assert!(parse_date("not a date").is_err());
        }

        #[test]
        fn test_parse_free_text_layouts() {
            let expected = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
            for s in [
                "2023-01-05",
                "2023/01/05",
                "01/05/2023",
                "1/5/2023",
                "Jan 5, 2023",
                "January 5, 2023",
                "5 Jan 2023",
                "5 January 2023",
                "January 5 2023",
                "2023-01-05T13:45:00",
                "2023-01-05 08:00",
                "2023-01-05T23:59:59Z",
            ] {
                assert_eq!(parse_free_text(s), Some(expected), "layout {s}");
            }
        }

        #[test]
        fn test_parse_free_text_invalid() {
            assert_eq!(parse_free_text(""), None);
            assert_eq!(parse_free_text("   "), None);
            assert_eq!(parse_free_text("yesterday"), None);
            assert_eq!(parse_free_text("2023-02-30"), None);
        }

        #[test]
        fn test_from_serial() {
            assert_eq!(from_serial(1.0), NaiveDate::from_ymd_opt(1900, 1, 1));
            assert_eq!(from_serial(59.0), NaiveDate::from_ymd_opt(1900, 2, 28));
            assert_eq!(from_serial(60.0), NaiveDate::from_ymd_opt(1900, 3, 1));
            assert_eq!(from_serial(61.0), NaiveDate::from_ymd_opt(1900, 3, 1));
            assert_eq!(from_serial(44927.0), NaiveDate::from_ymd_opt(2023, 1, 1));
            // time of day is dropped
            assert_eq!(from_serial(44927.75), NaiveDate::from_ymd_opt(2023, 1, 1));
        }

        #[test]
        fn test_from_serial_out_of_range() {
            assert_eq!(from_serial(-1.0), None);
            assert_eq!(from_serial(f64::NAN), None);
            assert_eq!(from_serial(f64::INFINITY), None);
            assert_eq!(from_serial(1e300), None);
        }
    }
}

/// Numeric coercion matching spreadsheet/JavaScript `Number(..)` semantics.
pub mod numbers {
    /// Coerce cell text to a number.
    ///
    /// Blank text is zero, `Infinity` spellings map to infinities, unsigned
    /// `0x`/`0o`/`0b` integers are honoured, and anything else that is not a
    /// plain decimal literal is `NaN`.
    pub fn coerce(s: &str) -> f64 {
        let s = s.trim();
        match s {
            "" => return 0.0,
            "Infinity" | "+Infinity" => return f64::INFINITY,
            "-Infinity" => return f64::NEG_INFINITY,
            _ => {}
        }
        let radix = match s.get(..2) {
            Some("0x" | "0X") => Some(16),
            Some("0o" | "0O") => Some(8),
            Some("0b" | "0B") => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            let digits = &s[2..];
            if digits.starts_with('+') {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
        // str::parse also accepts "inf" and "nan", which are not literals here
        if s.bytes()
            .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
        {
            return f64::NAN;
        }
        s.parse::<f64>().unwrap_or(f64::NAN)
    }

}
