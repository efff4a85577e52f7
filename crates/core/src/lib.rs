// SPDX-License-Identifier: MIT

//!
//! *Part of the wider OpenTimeslider project*
//!
//! This crate defines the calendar datatypes and arithmetic used across the
//! OpenTimeslider project (date/range state, filter injection, CLI):
//!
//! - Proleptic Gregorian calendar queries (leap years, month and year lengths)
//! - [`CalendarDate`], a validated signed date with no year 0
//! - Conversion to and from decimal dates, the continuous scalar used for
//!   slider positions and for comparing against feature attributes
//! - Calendar-correct stepping by days, months and years
//!
//! This crate aims to provide APIs for each type so that if a type is
//! instantiated, the developer can be sure it's valid.
//!

pub mod calendar;
mod date;
mod decimal;
mod format;
mod step;

pub use calendar::{days_in_month, days_in_year, is_leap_year, is_valid_month_day};
pub use date::*;
pub use decimal::*;
pub use format::*;
pub use step::*;

pub use open_timeslider_macros::date;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn date_macro() {
        assert_eq!(date!("2022-01-01"), CalendarDate::from_ymd(2022, 1, 1).unwrap());
        assert_eq!(date!("-0044-03-15"), CalendarDate::from_ymd(-44, 3, 15).unwrap());
        assert_eq!(date!("2024-02-29").to_string(), "2024-02-29");
    }
}
