//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM DD, YYYY") // -> "January 15, 2024"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date for a `<time datetime>` attribute
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Convert a Moment.js format to a chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each unit so `MM` never eats half of `MMMM`
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("Do", "%-d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-05");
        assert_eq!(format_date(&date, "MMMM DD, YYYY"), "January 05, 2024");
        assert_eq!(format_date(&date, "MMM Do YY"), "Jan 5 24");
    }

    #[test]
    fn test_date_xml() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let date = offset.with_ymd_and_hms(2020, 1, 2, 8, 0, 0).unwrap();
        assert_eq!(date_xml(&date), "2020-01-02T08:00:00+01:00");
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("MMMM DD, YYYY"), "%B %d, %Y");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }
}
