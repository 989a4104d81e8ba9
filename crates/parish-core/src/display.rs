//! Human-readable formatting for dates and type names.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse the date forms records carry: RFC 3339 timestamps, naive
/// date-times and plain dates, and the `Mon Jun 03 2024` day form.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc).naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(value, format) {
            return Some(time);
        }
    }
    ["%Y-%m-%d", "%a %b %d %Y"]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Format a stored date as `June 03, 2024 9:30 AM`, or `June 03, 2024`
/// when `without_time` is set. Missing or unparsable input gives `""`.
pub fn format_date(value: Option<&str>, without_time: bool) -> String {
    let Some(time) = value.and_then(parse_date) else {
        return String::new();
    };
    if without_time {
        time.format("%B %d, %Y").to_string()
    } else {
        time.format("%B %d, %Y %-I:%M %p").to_string()
    }
}

/// Insert a space at each lower-to-upper case boundary:
/// `BaptismRequestForm` becomes `Baptism Request Form`.
pub fn separate_pascal_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if prev.is_some_and(|p| p.is_ascii_lowercase()) && c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_and_without_time() {
        let stamp = Some("2024-06-03T09:05:00.000Z");
        assert_eq!(format_date(stamp, false), "June 03, 2024 9:05 AM");
        assert_eq!(format_date(stamp, true), "June 03, 2024");
        assert_eq!(format_date(Some("2024-12-25T18:30:00Z"), false), "December 25, 2024 6:30 PM");
    }

    #[test]
    fn plain_dates_and_day_form() {
        assert_eq!(format_date(Some("2024-02-09"), true), "February 09, 2024");
        assert_eq!(format_date(Some("Mon Jun 03 2024"), true), "June 03, 2024");
    }

    #[test]
    fn missing_or_invalid_is_empty() {
        assert_eq!(format_date(None, false), "");
        assert_eq!(format_date(Some(""), false), "");
        assert_eq!(format_date(Some("next tuesday"), true), "");
    }

    #[test]
    fn splits_pascal_case() {
        assert_eq!(separate_pascal_case("BaptismRequestForm"), "Baptism Request Form");
        assert_eq!(separate_pascal_case("MassAppointment"), "Mass Appointment");
        assert_eq!(separate_pascal_case("ABC"), "ABC");
        assert_eq!(separate_pascal_case(""), "");
    }
}
