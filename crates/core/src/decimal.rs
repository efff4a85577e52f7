// SPDX-License-Identifier: MIT

//!
//! Conversion between [`CalendarDate`]s and decimal dates.
//!
//! A decimal date is the signed year plus the proportion of the year elapsed
//! at noon of the given day, e.g. noon on 1st January 2022 is `2022 + 0.5/365`.
//!
//! For years before the common era the proportion is measured back from the
//! end of the year, so year `-1` occupies `(-2, -1)` with 1st January near
//! `-1.9986` and 31st December near `-1.0014`.  The gap `(-1, 1)` belongs to
//! the non-existent year 0.  Decimal order is therefore calendar order.
//!

use crate::calendar::{day_of_year, days_in_year, month_day_from_day_of_year};
use crate::{CalendarDate, DateError, Year};

/// The number of decimal places decimal dates are rounded to
pub const DECIMAL_PLACES: i32 = 6;

/// Round to [`DECIMAL_PLACES`]
fn round(value: f64) -> f64 {
    let factor = 10_f64.powi(DECIMAL_PLACES);
    (value * factor).round() / factor
}

/// The proportion of the year that has elapsed at noon of the date
fn proportion_of_year_elapsed(date: &CalendarDate) -> f64 {
    let year = date.year().value();
    let days_passed = day_of_year(year, date.month().value(), date.day().value());
    (f64::from(days_passed) + 0.5) / f64::from(days_in_year(year))
}

/// Convert a calendar date to its decimal date
pub fn to_decimal(date: &CalendarDate) -> f64 {
    let year = date.year().value();
    let proportion = proportion_of_year_elapsed(date);
    let decimal = if year > 0 {
        f64::from(year) + proportion
    } else {
        -(f64::from(year.unsigned_abs()) + (1.0 - proportion))
    };
    round(decimal)
}

/// Convert a decimal date to the calendar date whose day it falls on.
///
/// Any value inside a year maps to a day of that year, not only the noon
/// values produced by [`to_decimal`].  Values in the year 0 gap `(-1, 1)`, or
/// that aren't finite, are rejected.
pub fn to_calendar_date(decimal: f64) -> Result<CalendarDate, DateError> {
    if !decimal.is_finite() {
        return Err(DateError::InvalidDecimal(decimal));
    }

    let magnitude = decimal.abs();
    let whole_years = magnitude.floor();
    if whole_years < 1.0 {
        return Err(DateError::InvalidDecimal(decimal));
    }
    if whole_years > i32::MAX as f64 {
        return Err(DateError::InvalidYear(whole_years as i64));
    }

    let (year, proportion) = if decimal >= 0.0 {
        (whole_years as i64, magnitude - whole_years)
    } else {
        (-(whole_years as i64), 1.0 - (magnitude - whole_years))
    };
    let year = Year::try_from(year)?;

    let days = days_in_year(year.value());
    let day_index = (proportion * f64::from(days)).floor().clamp(0.0, f64::from(days - 1));
    let (month, day) = month_day_from_day_of_year(year.value(), day_index as u16);

    CalendarDate::from_ymd(i64::from(year.value()), i64::from(month), i64::from(day))
}

/// Move a value out of the year 0 gap to the nearest edge of a real year:
/// `(-1, 0)` goes to `-1.0` (the end of 1 BCE) and `[0, 1)` to `1.0` (the
/// start of 1 CE).  Other values are returned unchanged.
pub fn snap_out_of_year_zero(decimal: f64) -> f64 {
    if decimal > -1.0 && decimal < 0.0 {
        -1.0
    } else if (0.0..1.0).contains(&decimal) {
        1.0
    } else {
        decimal
    }
}

impl CalendarDate {
    /// The decimal date (see [`to_decimal`])
    pub fn to_decimal(&self) -> f64 {
        to_decimal(self)
    }

    /// Create from a decimal date (see [`to_calendar_date`])
    pub fn from_decimal(decimal: f64) -> Result<Self, DateError> {
        to_calendar_date(decimal)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::calendar::days_in_month;

    fn ymd(year: i64, month: i64, day: i64) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn known_values() {
        assert_eq!(to_decimal(&ymd(2022, 1, 1)), 2022.00137);
        assert!((to_decimal(&ymd(2022, 1, 1)) - (2022.0 + 0.5 / 365.0)).abs() < 1e-6);
        assert!((to_decimal(&ymd(2024, 12, 31)) - (2024.0 + 365.5 / 366.0)).abs() < 1e-6);
        assert!((to_decimal(&ymd(-1, 12, 31)) - -(1.0 + 0.5 / 365.0)).abs() < 1e-6);
        assert!((to_decimal(&ymd(-1, 1, 1)) - -(2.0 - 0.5 / 365.0)).abs() < 1e-6);
    }

    #[test]
    fn no_year_zero_between_bce_and_ce() {
        let bce = to_decimal(&ymd(-1, 12, 31));
        let ce = to_decimal(&ymd(1, 1, 1));
        assert!(bce < ce);
        assert!(bce < -1.0);
        assert!(ce > 1.0);
    }

    #[test]
    fn round_trip_and_ordering() {
        let mut previous: Option<f64> = None;
        for year in -4000..=4000_i64 {
            if year == 0 {
                continue;
            }
            for month in 1..=12_u8 {
                let days = days_in_month(year as i32, month).unwrap();
                for day in 1..=days {
                    let date = ymd(year, i64::from(month), i64::from(day));
                    let decimal = to_decimal(&date);
                    assert_eq!(to_calendar_date(decimal), Ok(date), "{date} -> {decimal}");
                    if let Some(previous) = previous {
                        assert!(previous < decimal, "{date} is not after the day before");
                    }
                    previous = Some(decimal);
                }
            }
        }
    }

    #[test]
    fn any_position_in_a_year_is_a_day() {
        assert_eq!(to_calendar_date(2022.0), Ok(ymd(2022, 1, 1)));
        assert_eq!(to_calendar_date(2022.999_999), Ok(ymd(2022, 12, 31)));
        assert_eq!(to_calendar_date(-1.0), Ok(ymd(-1, 12, 31)));
        assert_eq!(to_calendar_date(-1.999_999), Ok(ymd(-1, 1, 1)));
        assert_eq!(to_calendar_date(-2.0), Ok(ymd(-2, 12, 31)));
    }

    #[test]
    fn rejected_decimals() {
        assert!(to_calendar_date(0.0).is_err());
        assert!(to_calendar_date(0.5).is_err());
        assert!(to_calendar_date(-0.5).is_err());
        assert!(to_calendar_date(f64::NAN).is_err());
        assert!(to_calendar_date(f64::INFINITY).is_err());
        assert!(to_calendar_date(1e12).is_err());
    }

    #[test]
    fn snapping() {
        assert_eq!(snap_out_of_year_zero(-0.5), -1.0);
        assert_eq!(snap_out_of_year_zero(-0.000_001), -1.0);
        assert_eq!(snap_out_of_year_zero(0.0), 1.0);
        assert_eq!(snap_out_of_year_zero(0.999), 1.0);
        assert_eq!(snap_out_of_year_zero(-1.0), -1.0);
        assert_eq!(snap_out_of_year_zero(1.5), 1.5);
        assert_eq!(to_calendar_date(snap_out_of_year_zero(0.3)), Ok(ymd(1, 1, 1)));
        assert_eq!(to_calendar_date(snap_out_of_year_zero(-0.3)), Ok(ymd(-1, 12, 31)));
    }
}
