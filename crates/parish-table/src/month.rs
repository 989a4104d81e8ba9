//! Month filter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, Month, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::error::InvalidMonthFilter;

/// Primary creation timestamp field.
const CREATED_FIELD: &str = "dateTimeStamp";
/// Older records carry their creation time here instead.
const LEGACY_CREATED_FIELD: &str = "created";

/// The month-filter choice offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    Month(Month),
}

/// Which calendar month a non-`All` filter compares against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthMatch {
    /// The current month, whichever month was picked.
    #[default]
    Current,
    /// The picked month of the current year.
    Selected,
}

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// `All` followed by the twelve months in calendar order.
pub fn month_options() -> Vec<MonthFilter> {
    std::iter::once(MonthFilter::All)
        .chain(MONTHS.into_iter().map(MonthFilter::Month))
        .collect()
}

impl MonthFilter {
    pub fn label(&self) -> &'static str {
        match self {
            MonthFilter::All => "All",
            MonthFilter::Month(month) => month.name(),
        }
    }

    /// Returns true if `record` passes this filter on `today`.
    ///
    /// `All` passes everything. Otherwise the record's creation date must
    /// fall in the target month; records without a readable creation date
    /// never pass.
    pub fn matches(&self, record: &Value, mode: MonthMatch, today: NaiveDate) -> bool {
        let MonthFilter::Month(picked) = self else {
            return true;
        };
        let Some(created) = created_date(record) else {
            return false;
        };
        let target = match mode {
            MonthMatch::Current => today.month(),
            MonthMatch::Selected => picked.number_from_month(),
        };
        created.year() == today.year() && created.month() == target
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MonthFilter {
    type Err = InvalidMonthFilter;

    /// Accepts `All`, a month name or abbreviation, or a month number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        if let Ok(n) = s.parse::<u8>() {
            return Month::try_from(n)
                .map(MonthFilter::Month)
                .map_err(|_| InvalidMonthFilter(s.to_string()));
        }
        s.parse::<Month>()
            .map(MonthFilter::Month)
            .map_err(|_| InvalidMonthFilter(s.to_string()))
    }
}

/// The local calendar date a record was created on.
pub fn created_date(record: &Value) -> Option<NaiveDate> {
    let fields = record.as_object()?;
    let stamp = fields
        .get(CREATED_FIELD)
        .or_else(|| fields.get(LEGACY_CREATED_FIELD))?
        .as_str()?
        .trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(stamp) {
        return Some(time.with_timezone(&Local).date_naive());
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(time.date());
    }
    NaiveDate::parse_from_str(stamp, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn options_start_with_all() {
        let options = month_options();
        assert_eq!(options.len(), 13);
        assert_eq!(options[0], MonthFilter::All);
        assert_eq!(options[1].label(), "January");
        assert_eq!(options[12].label(), "December");
    }

    #[test]
    fn parses_names_numbers_and_all() {
        assert_eq!("All".parse(), Ok(MonthFilter::All));
        assert_eq!("march".parse(), Ok(MonthFilter::Month(Month::March)));
        assert_eq!("Sep".parse(), Ok(MonthFilter::Month(Month::September)));
        assert_eq!("12".parse(), Ok(MonthFilter::Month(Month::December)));
        assert!("13".parse::<MonthFilter>().is_err());
        assert!("Smarch".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn current_mode_ignores_picked_month() {
        let june = json!({"dateTimeStamp": "2024-06-10"});
        let filter = MonthFilter::Month(Month::January);
        assert!(filter.matches(&june, MonthMatch::Current, today()));
        assert!(!filter.matches(&june, MonthMatch::Selected, today()));
    }

    #[test]
    fn selected_mode_uses_picked_month_of_this_year() {
        let march = json!({"dateTimeStamp": "2024-03-10"});
        let last_march = json!({"dateTimeStamp": "2023-03-10"});
        let filter = MonthFilter::Month(Month::March);
        assert!(filter.matches(&march, MonthMatch::Selected, today()));
        assert!(!filter.matches(&last_march, MonthMatch::Selected, today()));
    }

    #[test]
    fn legacy_created_field_is_used() {
        let record = json!({"created": "2024-06-02"});
        assert!(MonthFilter::Month(Month::June).matches(&record, MonthMatch::Current, today()));
    }

    #[test]
    fn unreadable_records_never_match() {
        let filter = MonthFilter::Month(Month::June);
        for record in [
            json!({"dateTimeStamp": "soon"}),
            json!({"dateTimeStamp": 17}),
            json!({"name": "no stamp"}),
            json!("text"),
            json!(null),
        ] {
            assert!(!filter.matches(&record, MonthMatch::Current, today()));
        }
        assert!(MonthFilter::All.matches(&json!("text"), MonthMatch::Current, today()));
    }
}
