//! Time types and day count conventions.
//!
//! Engines work in year fractions measured from the evaluation date. This
//! module turns calendar dates into those year fractions.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2022, 2, 24).unwrap();
//! let expiry = Date::from_ymd(2022, 5, 24).unwrap();
//!
//! // 89 days under ACT/365
//! let yf = DayCountConvention::ActualActual365.year_fraction_dates(today, expiry);
//! assert!((yf - 89.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2022, 3, 4).unwrap();
/// assert_eq!(date.month(), 3);
///
/// let parsed: Date = "2022-03-04".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let later = Date::from_ymd(2022, 3, 14).unwrap();
/// assert_eq!(later - date, 10);
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
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the date `days` calendar days later.
    pub fn add_days(self, days: u64) -> Result<Self, DateError> {
        self.0
            .checked_add_days(Days::new(days))
            .map(Date)
            .ok_or_else(|| DateError::ParseError(format!("{} + {} days overflows", self, days)))
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

    /// Returns the day-of-month component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Number of calendar days from `rhs` to `self`.
    fn sub(self, rhs: Self) -> Self::Output {
        (self.0 - rhs.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day count conventions for year fraction calculation.
///
/// Only the actual-day conventions are supported; engines never need more
/// than a consistent mapping from dates to times.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ACT/365"))]
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    #[cfg_attr(feature = "serde", serde(rename = "ACT/360"))]
    ActualActual360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::ActualActual365.name(), "ACT/365");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
        }
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Returns a negative value when `start > end`.
    pub fn year_fraction_dates(&self, start: Date, end: Date) -> f64 {
        let days = (end - start) as f64;
        match self {
            DayCountConvention::ActualActual365 => days / 365.0,
            DayCountConvention::ActualActual360 => days / 360.0,
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACT/365" | "ACT365" | "ACTUAL/365" => Ok(DayCountConvention::ActualActual365),
            "ACT/360" | "ACT360" | "ACTUAL/360" => Ok(DayCountConvention::ActualActual360),
            _ => Err(DateError::ParseError(format!(
                "unknown day count convention: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Time from `start` to `end` in years under ACT/365.
///
/// Negative when `end` precedes `start`.
pub fn time_to_maturity_dates(start: Date, end: Date) -> f64 {
    DayCountConvention::ActualActual365.year_fraction_dates(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_from_ymd_invalid() {
        let err = Date::from_ymd(2022, 2, 30).unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidDate {
                year: 2022,
                month: 2,
                day: 30
            }
        );
    }

    #[test]
    fn test_parse_and_display() {
        let date = Date::parse("2022-05-24").unwrap();
        assert_eq!(date.to_string(), "2022-05-24");
        assert!(Date::parse("24/05/2022").is_err());
    }

    #[test]
    fn test_add_days() {
        let today = Date::from_ymd(2022, 2, 24).unwrap();
        let next = today.add_days(8).unwrap();
        assert_eq!(next, Date::from_ymd(2022, 3, 4).unwrap());
    }

    #[test]
    fn test_act365_year_fraction() {
        let today = Date::from_ymd(2022, 2, 24).unwrap();
        let six_months = Date::from_ymd(2022, 8, 24).unwrap();
        let yf = DayCountConvention::ActualActual365.year_fraction_dates(today, six_months);
        assert_relative_eq!(yf, 181.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_act360_year_fraction() {
        let start = Date::from_ymd(2022, 1, 1).unwrap();
        let end = Date::from_ymd(2022, 1, 31).unwrap();
        let yf = DayCountConvention::ActualActual360.year_fraction_dates(start, end);
        assert_relative_eq!(yf, 30.0 / 360.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_time_to_maturity() {
        let start = Date::from_ymd(2022, 5, 24).unwrap();
        let end = Date::from_ymd(2022, 2, 24).unwrap();
        assert!(time_to_maturity_dates(start, end) < 0.0);
    }

    #[test]
    fn test_convention_from_str() {
        assert_eq!(
            "act/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::ActualActual365
        );
        assert!("30/360".parse::<DayCountConvention>().is_err());
    }

    proptest! {
        #[test]
        fn prop_year_fraction_is_antisymmetric(a in 0u64..5000, b in 0u64..5000) {
            let base = Date::from_ymd(2000, 1, 1).unwrap();
            let d1 = base.add_days(a).unwrap();
            let d2 = base.add_days(b).unwrap();
            let fwd = time_to_maturity_dates(d1, d2);
            let bwd = time_to_maturity_dates(d2, d1);
            prop_assert!((fwd + bwd).abs() < 1e-12);
        }
    }
}
