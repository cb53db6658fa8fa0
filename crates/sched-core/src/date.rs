//! Naive calendar dates in the fixed `YYYYMMDD` wire format.
//!
//! Dates carry no time of day and no timezone. [`CalendarDate::is_after`] is
//! the single "after now" predicate used by every recurrence handler.

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of ASCII digits in a serialized date.
const DATE_LEN: usize = 8;

/// Years outside `0..=9999` do not fit in four digits.
const MAX_YEAR: i32 = 9999;

/// A Gregorian year/month/day triple. Always a valid date between
/// `00000101` and `99991231`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CalendarDate(NaiveDate);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date '{0}', expected YYYYMMDD")]
pub struct ParseDateError(pub String);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::checked)
    }

    fn checked(date: NaiveDate) -> Option<Self> {
        (0..=MAX_YEAR).contains(&date.year()).then_some(Self(date))
    }

    /// The current local calendar date.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Strict calendar-date comparison: `true` iff `self` falls on a later
    /// day than `reference`.
    ///
    /// Recurrence handlers always call this as `candidate.is_after(now)`.
    #[inline]
    pub fn is_after(&self, reference: CalendarDate) -> bool {
        (self.year(), self.month(), self.day()) > (reference.year(), reference.month(), reference.day())
    }

    /// ISO weekday number, Monday = 1 through Sunday = 7.
    pub fn iso_weekday(&self) -> u8 {
        // number_from_monday is always within 1..=7
        self.0.weekday().number_from_monday() as u8
    }

    pub fn last_day_of_month(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if self.is_leap_year() => 29,
            2 => 28,
            _ => 31,
        }
    }

    pub fn is_leap_year(&self) -> bool {
        NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some()
    }

    /// The following day, or `None` at the end of the supported range.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().and_then(Self::checked)
    }

    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).and_then(Self::checked)
    }

    /// Same month and day one year later. February 29 becomes March 1 when
    /// the following year is not a leap year.
    pub fn add_year(&self) -> Option<Self> {
        let year = self.year().checked_add(1)?;
        NaiveDate::from_ymd_opt(year, self.month(), self.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
            .and_then(Self::checked)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseDateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::checked(date).ok_or_else(|| ParseDateError(date.to_string()))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DATE_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseDateError(s.to_string()));
        }

        let field = |range: std::ops::Range<usize>| s[range].parse::<u32>().ok();
        let year = field(0..4).and_then(|y| i32::try_from(y).ok());
        let month = field(4..6);
        let day = field(6..8);

        match (year, month, day) {
            (Some(y), Some(m), Some(d)) => {
                Self::from_ymd(y, m, d).ok_or_else(|| ParseDateError(s.to_string()))
            }
            _ => Err(ParseDateError(s.to_string())),
        }
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = ParseDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("20240115", 2024, 1, 15)]
    #[case("20240229", 2024, 2, 29)]
    #[case("00010101", 1, 1, 1)]
    #[case("99991231", 9999, 12, 31)]
    fn test_parse_valid(#[case] input: &str, #[case] y: i32, #[case] m: u32, #[case] d: u32) {
        assert_eq!(date(input), CalendarDate::from_ymd(y, m, d).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("2024011")]
    #[case("202401150")]
    #[case("2024-01-15")]
    #[case("20230229")]
    #[case("20241301")]
    #[case("20240100")]
    #[case("2024O115")]
    #[case("+2024011")]
    #[case("１２３４５６７８")]
    fn test_parse_invalid(#[case] input: &str) {
        assert_eq!(input.parse::<CalendarDate>(), Err(ParseDateError(input.to_string())));
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(CalendarDate::from_ymd(987, 3, 4).unwrap().to_string(), "09870304");
        assert_eq!(date("20241231").to_string(), "20241231");
    }

    #[test]
    fn test_is_after_ignores_nothing_but_the_date() {
        let now = date("20240115");
        assert!(date("20240116").is_after(now));
        assert!(date("20250101").is_after(now));
        assert!(!now.is_after(now));
        assert!(!date("20240114").is_after(now));
        assert!(!date("20231231").is_after(now));
    }

    #[rstest]
    #[case("20240101", 31)]
    #[case("20240215", 29)]
    #[case("20230215", 28)]
    #[case("19000201", 28)]
    #[case("20000201", 29)]
    #[case("20240430", 30)]
    #[case("20241231", 31)]
    fn test_last_day_of_month(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(date(input).last_day_of_month(), expected);
    }

    #[test]
    fn test_iso_weekday() {
        assert_eq!(date("20240101").iso_weekday(), 1); // Monday
        assert_eq!(date("20240303").iso_weekday(), 7); // Sunday
        assert_eq!(date("20240306").iso_weekday(), 3);
    }

    #[test]
    fn test_add_year_rolls_leap_day_forward() {
        assert_eq!(date("20240229").add_year(), Some(date("20250301")));
        assert_eq!(date("20240115").add_year(), Some(date("20250115")));
        assert_eq!(date("20231231").add_year(), Some(date("20241231")));
    }

    #[test]
    fn test_add_days_crosses_month_and_year() {
        assert_eq!(date("20240130").add_days(3), Some(date("20240202")));
        assert_eq!(date("20241230").add_days(2), Some(date("20250101")));
        assert_eq!(date("20240228").succ(), Some(date("20240229")));
    }

    #[test]
    fn test_range_ends_at_year_9999() {
        let last = date("99991231");
        assert_eq!(last.succ(), None);
        assert_eq!(last.add_days(1), None);
        assert_eq!(date("99990301").add_year(), None);
        assert_eq!(date("99981231").succ(), Some(date("99990101")));
        assert_eq!(CalendarDate::from_ymd(10000, 1, 1), None);
        assert!(CalendarDate::try_from(NaiveDate::from_ymd_opt(10000, 1, 1).unwrap()).is_err());
        assert!(CalendarDate::try_from(NaiveDate::from_ymd_opt(-1, 1, 1).unwrap()).is_err());
    }

    #[test]
    fn test_serde_uses_wire_format() {
        let json = serde_json::to_string(&date("20240301")).unwrap();
        assert_eq!(json, "\"20240301\"");

        let parsed: CalendarDate = serde_json::from_str("\"20240301\"").unwrap();
        assert_eq!(parsed, date("20240301"));
        assert!(serde_json::from_str::<CalendarDate>("\"2024-03-01\"").is_err());
    }
}
