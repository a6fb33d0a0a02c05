//! Calendar date type and arithmetic for payment timetables.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Clamped calendar-month addition (`Date::add_months`)
//! - Signed calendar-day offsets (`Date::add_days`, `Date::sub_days`)
//! - Month-end helpers and short period labels ("Jan 2024")
//!
//! # Examples
//!
//! ```
//! use payment_core::types::time::Date;
//!
//! let anchor = Date::from_ymd(2024, 1, 31).unwrap();
//!
//! // Month addition clamps to the last valid day instead of overflowing
//! let next = anchor.add_months(1).unwrap();
//! assert_eq!(next, Date::from_ymd(2024, 2, 29).unwrap());
//! assert_eq!(next.period_label(), "Feb 2024");
//! ```

use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// ISO 8601 calendar date format used for parsing and display.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the calendar arithmetic needed to
/// lay out monthly payment cycles.
///
/// # Examples
///
/// ```
/// use payment_core::types::time::Date;
///
/// // Create from year, month, day
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// // Calculate days between dates
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use payment_core::types::time::Date;
    ///
    /// let leap = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert_eq!(leap.day(), 29);
    ///
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// Surrounding whitespace is ignored; anything else that is not a
    /// valid calendar date, including the empty string, is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use payment_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("").is_err());
    /// assert!(Date::parse("2024-02-30").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::ParseError("empty date string".to_string()));
        }
        NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", trimmed, e)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds calendar months, clamping to the last day of the target month.
    ///
    /// The day-of-month is kept when the target month has it and reduced
    /// to the month's last day otherwise, so the result never spills into
    /// the following month.
    ///
    /// # Examples
    ///
    /// ```
    /// use payment_core::types::time::Date;
    ///
    /// let jan_31 = Date::from_ymd(2024, 1, 31).unwrap();
    /// assert_eq!(jan_31.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    /// assert_eq!(jan_31.add_months(2).unwrap(), Date::from_ymd(2024, 3, 31).unwrap());
    /// assert_eq!(jan_31.add_months(3).unwrap(), Date::from_ymd(2024, 4, 30).unwrap());
    /// ```
    pub fn add_months(self, months: u32) -> Result<Self, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or_else(|| DateError::overflow(format!("adding {} months to {}", months, self)))
    }

    /// Moves the date by a signed number of calendar days.
    ///
    /// # Examples
    ///
    /// ```
    /// use payment_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 3, 30).unwrap();
    /// assert_eq!(date.add_days(14).unwrap(), Date::from_ymd(2024, 4, 13).unwrap());
    /// assert_eq!(date.add_days(-7).unwrap(), Date::from_ymd(2024, 3, 23).unwrap());
    /// ```
    pub fn add_days(self, days: i64) -> Result<Self, DateError> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::overflow(format!("adding {} days to {}", days, self)))
    }

    /// Moves the date back by a signed number of calendar days.
    ///
    /// A negative `days` moves the date forward.
    pub fn sub_days(self, days: i64) -> Result<Self, DateError> {
        let shifted = if days >= 0 {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::overflow(format!("subtracting {} days from {}", days, self)))
    }

    /// Returns the number of days in this date's month.
    pub fn days_in_month(&self) -> u32 {
        self.last_day_of_month().day()
    }

    /// Returns the last calendar day of this date's month.
    ///
    /// # Examples
    ///
    /// ```
    /// use payment_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2023, 2, 10).unwrap();
    /// assert_eq!(date.last_day_of_month(), Date::from_ymd(2023, 2, 28).unwrap());
    /// ```
    pub fn last_day_of_month(&self) -> Date {
        let (year, month) = (self.year(), self.month());
        let last = if month == 12 {
            NaiveDate::from_ymd_opt(year, 12, 31)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1).and_then(|first| first.pred_opt())
        };
        last.map(Date).unwrap_or(*self)
    }

    /// Returns true if this date is the last day of its month.
    pub fn is_month_end(&self) -> bool {
        *self == self.last_day_of_month()
    }

    /// Returns the short period label, e.g. `"Jan 2024"`.
    ///
    /// Month abbreviations are always English, independent of locale.
    ///
    /// # Examples
    ///
    /// ```
    /// use payment_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2025, 12, 29).unwrap();
    /// assert_eq!(date.period_label(), "Dec 2025");
    /// ```
    pub fn period_label(&self) -> String {
        self.0.format("%b %Y").to_string()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_date_from_ymd_valid() {
        let date = d(2024, 6, 15);
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_date_from_ymd_invalid() {
        let result = Date::from_ymd(2023, 2, 29);
        assert_eq!(
            result,
            Err(DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(Date::from_ymd(2024, 13, 1).is_err());
        assert!(Date::from_ymd(2024, 4, 31).is_err());
    }

    #[test]
    fn test_date_parse_valid() {
        assert_eq!(Date::parse("2024-03-30").unwrap(), d(2024, 3, 30));
        assert_eq!(Date::parse("  2024-03-30\n").unwrap(), d(2024, 3, 30));
    }

    #[test]
    fn test_date_parse_invalid() {
        assert!(matches!(Date::parse(""), Err(DateError::ParseError(_))));
        assert!(matches!(Date::parse("   "), Err(DateError::ParseError(_))));
        assert!(Date::parse("not-a-date").is_err());
        assert!(Date::parse("2024/03/30").is_err());
        assert!(Date::parse("2024-02-30").is_err());
        assert!(Date::parse("30-03-2024").is_err());
    }

    #[test]
    fn test_date_display_and_from_str() {
        let date: Date = "2024-01-05".parse().unwrap();
        assert_eq!(date.to_string(), "2024-01-05");
    }

    #[test]
    fn test_date_subtraction() {
        assert_eq!(d(2024, 4, 13) - d(2024, 3, 30), 14);
        assert_eq!(d(2024, 3, 30) - d(2024, 4, 13), -14);
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let anchor = d(2024, 1, 31);
        assert_eq!(anchor.add_months(0).unwrap(), anchor);
        assert_eq!(anchor.add_months(1).unwrap(), d(2024, 2, 29));
        assert_eq!(anchor.add_months(2).unwrap(), d(2024, 3, 31));
        assert_eq!(anchor.add_months(3).unwrap(), d(2024, 4, 30));
        assert_eq!(anchor.add_months(13).unwrap(), d(2025, 2, 28));
    }

    #[test]
    fn test_add_months_preserves_day_when_possible() {
        let anchor = d(2024, 1, 15);
        assert_eq!(anchor.add_months(1).unwrap(), d(2024, 2, 15));
        assert_eq!(anchor.add_months(11).unwrap(), d(2024, 12, 15));
        assert_eq!(anchor.add_months(12).unwrap(), d(2025, 1, 15));
    }

    #[test]
    fn test_add_months_short_month_anchor_keeps_day() {
        let anchor = d(2024, 4, 30);
        assert_eq!(anchor.add_months(1).unwrap(), d(2024, 5, 30));
        assert_eq!(anchor.add_months(10).unwrap(), d(2025, 2, 28));
    }

    #[test]
    fn test_add_months_overflow() {
        let max = Date::from(NaiveDate::MAX);
        assert!(matches!(
            max.add_months(1),
            Err(DateError::Overflow { .. })
        ));
    }

    #[test]
    fn test_add_days_signed() {
        let date = d(2024, 3, 30);
        assert_eq!(date.add_days(0).unwrap(), date);
        assert_eq!(date.add_days(14).unwrap(), d(2024, 4, 13));
        assert_eq!(date.add_days(-7).unwrap(), d(2024, 3, 23));
        assert_eq!(date.add_days(-30).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn test_sub_days_signed() {
        let date = d(2024, 4, 13);
        assert_eq!(date.sub_days(5).unwrap(), d(2024, 4, 8));
        assert_eq!(date.sub_days(-5).unwrap(), d(2024, 4, 18));
    }

    #[test]
    fn test_add_days_overflow() {
        let min = Date::from(NaiveDate::MIN);
        assert!(matches!(min.add_days(-1), Err(DateError::Overflow { .. })));
        let max = Date::from(NaiveDate::MAX);
        assert!(matches!(max.sub_days(-1), Err(DateError::Overflow { .. })));
    }

    #[test]
    fn test_month_end_helpers() {
        assert_eq!(d(2024, 2, 10).last_day_of_month(), d(2024, 2, 29));
        assert_eq!(d(2023, 2, 10).last_day_of_month(), d(2023, 2, 28));
        assert_eq!(d(2024, 12, 1).last_day_of_month(), d(2024, 12, 31));
        assert_eq!(d(2024, 4, 1).days_in_month(), 30);
        assert!(d(2024, 4, 30).is_month_end());
        assert!(!d(2024, 5, 30).is_month_end());
    }

    #[test]
    fn test_period_label() {
        assert_eq!(d(2024, 1, 15).period_label(), "Jan 2024");
        assert_eq!(d(2025, 12, 29).period_label(), "Dec 2025");
        assert_eq!(d(2024, 9, 1).period_label(), "Sep 2024");
    }

    #[test]
    fn test_date_ordering() {
        assert!(d(2024, 1, 1) < d(2024, 1, 2));
        assert!(d(2024, 12, 31) < d(2025, 1, 1));
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_date_serde_roundtrip() {
            let date = d(2024, 6, 15);
            let json = serde_json::to_string(&date).unwrap();
            assert_eq!(json, "\"2024-06-15\"");

            let parsed: Date = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, date);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn date_strategy() -> impl Strategy<Value = Date> {
            (1900i32..2200i32, 1u32..13u32, 1u32..32u32).prop_filter_map(
                "valid date",
                |(year, month, day)| Date::from_ymd(year, month, day).ok(),
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_add_months_lands_in_target_month(date in date_strategy(), months in 0u32..240) {
                let shifted = date.add_months(months).unwrap();
                let total = date.year() * 12 + date.month() as i32 - 1 + months as i32;
                prop_assert_eq!(shifted.year(), total.div_euclid(12));
                prop_assert_eq!(shifted.month() as i32, total.rem_euclid(12) + 1);
            }

            #[test]
            fn test_add_months_clamps_day(date in date_strategy(), months in 0u32..240) {
                let shifted = date.add_months(months).unwrap();
                let expected_day = date.day().min(shifted.days_in_month());
                prop_assert_eq!(shifted.day(), expected_day);
            }

            #[test]
            fn test_add_then_sub_days_is_identity(date in date_strategy(), days in -5000i64..5000) {
                let there = date.add_days(days).unwrap();
                prop_assert_eq!(there - date, days);
                prop_assert_eq!(there.sub_days(days).unwrap(), date);
            }
        }
    }
}
