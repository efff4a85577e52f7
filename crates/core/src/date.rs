// SPDX-License-Identifier: MIT

//!
//! The OpenTimeslider calendar date type
//!

use crate::calendar::{days_in_month, is_valid_month_day};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The minimum year allowed
pub const MIN_YEAR: i64 = -999_999;

/// The maximum year allowed
pub const MAX_YEAR: i64 = 999_999;

/// Errors that can arise in relation to a [`CalendarDate`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DateError {
    /// The text is not of the form `[-]YYYY-MM-DD`
    #[error("`{0}` is not a YYYY-MM-DD date")]
    InvalidFormat(String),

    /// The year is outside of [`MIN_YEAR`] <= year <= [`MAX_YEAR`]
    #[error("Year `{0}` is not allowed")]
    InvalidYear(i64),

    /// There is no year 0 (1 BCE is followed by 1 CE)
    #[error("There is no year 0")]
    YearZero,

    /// The month number is not allowed (must be 1 <= month <= 12)
    #[error("Month `{0}` is not allowed")]
    InvalidMonth(i64),

    /// The day number is not allowed (must be 1 <= day <= 31)
    #[error("Day `{0}` is not allowed")]
    InvalidDayNumber(i64),

    /// The day does not exist in that month of that year
    #[error("Day `{day}` does not exist in {year}-{month:02}")]
    InvalidDay { year: i64, month: i64, day: i64 },

    /// The decimal date can't be converted to a calendar date
    #[error("Decimal date `{0}` does not correspond to a calendar date")]
    InvalidDecimal(f64),
}

/// The year type.  Never 0.
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Year(i32);

/// The month type (1 <= month <= 12)
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Month(u8);

/// The day of the month type (1 <= day <= 31)
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Day(u8);

impl Year {
    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn min() -> Self {
        Year(MIN_YEAR as i32)
    }

    pub fn max() -> Self {
        Year(MAX_YEAR as i32)
    }

    /// Whether the year is before the common era
    pub fn is_bce(&self) -> bool {
        self.0 < 0
    }
}

impl Month {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Day {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Year {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(DateError::YearZero)
        } else if (MIN_YEAR..=MAX_YEAR).contains(&value) {
            Ok(Year(value as i32))
        } else {
            Err(DateError::InvalidYear(value))
        }
    }
}

impl TryFrom<i64> for Month {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=12).contains(&value) {
            Ok(Month(value as u8))
        } else {
            Err(DateError::InvalidMonth(value))
        }
    }
}

impl TryFrom<i64> for Day {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=31).contains(&value) {
            Ok(Day(value as u8))
        } else {
            Err(DateError::InvalidDayNumber(value))
        }
    }
}

/// A calendar-valid signed (year, month, day)
///
/// Field order matters: the derived [`Ord`] compares year, then month, then
/// day, which is calendar order because there is no year 0.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
}

impl CalendarDate {
    /// Create a new [`CalendarDate`] if the result will be valid
    pub fn from_ymd(year: i64, month: i64, day: i64) -> Result<Self, DateError> {
        let year = Year::try_from(year)?;
        let month = Month::try_from(month)?;
        let invalid_day = || DateError::InvalidDay {
            year: i64::from(year.0),
            month: i64::from(month.0),
            day,
        };
        let day = u8::try_from(day).map_err(|_| invalid_day())?;
        if !is_valid_month_day(year.0, month.0, day) {
            return Err(invalid_day());
        }
        Ok(CalendarDate {
            year,
            month,
            day: Day(day),
        })
    }

    /// 1st January of the year
    pub fn first_of_year(year: Year) -> Self {
        CalendarDate {
            year,
            month: Month(1),
            day: Day(1),
        }
    }

    /// 31st December of the year
    pub fn last_of_year(year: Year) -> Self {
        CalendarDate {
            year,
            month: Month(12),
            day: Day(31),
        }
    }

    /// Create a date, clamping the day to the length of the month (e.g. 31st
    /// of February becomes the 28th or 29th)
    pub(crate) fn clamped(year: Year, month: Month, day: u8) -> Self {
        let max = days_in_month(year.0, month.0).unwrap_or(28);
        CalendarDate {
            year,
            month,
            day: Day(day.clamp(1, max)),
        }
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day(&self) -> Day {
        self.day
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.year.is_bce() { "-" } else { "" };
        write!(
            f,
            "{sign}{:04}-{:02}-{:02}",
            self.year.0.unsigned_abs(),
            self.month.0,
            self.day.0
        )
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    // [-|+]Y+-MM-DD, the year having any number of digits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateError::InvalidFormat(s.to_string());
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let mut parts = rest.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(year) || month.len() != 2 || day.len() != 2 {
            return Err(invalid());
        }
        if !all_digits(month) || !all_digits(day) {
            return Err(invalid());
        }

        let year: i64 = year.parse().map_err(|_| invalid())?;
        let year = if negative { -year } else { year };
        let month: i64 = month.parse().map_err(|_| invalid())?;
        let day: i64 = day.parse().map_err(|_| invalid())?;
        CalendarDate::from_ymd(year, month, day)
    }
}

impl TryFrom<&str> for CalendarDate {
    type Error = DateError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Anything that can be turned into a validated [`CalendarDate`].  This is the
/// single gate raw input passes through.
pub trait ToCalendarDate {
    fn to_calendar_date(&self) -> Result<CalendarDate, DateError>;
}

impl ToCalendarDate for CalendarDate {
    fn to_calendar_date(&self) -> Result<CalendarDate, DateError> {
        Ok(*self)
    }
}

impl ToCalendarDate for str {
    fn to_calendar_date(&self) -> Result<CalendarDate, DateError> {
        self.trim().parse()
    }
}

impl ToCalendarDate for String {
    fn to_calendar_date(&self) -> Result<CalendarDate, DateError> {
        self.as_str().to_calendar_date()
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(serde::de::Error::custom)
    }
}
