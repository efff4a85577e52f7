// SPDX-License-Identifier: MIT

//!
//! The current date and the date range, kept consistent
//!

use log::{debug, warn};
use open_timeslider_core::{CalendarDate, DateError, StepUnit, ToCalendarDate, step_by};
use thiserror::Error;

/// Errors that can arise in relation to a date range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// One of the range's dates is invalid
    #[error("Invalid range date: {0}")]
    InvalidEndpoint(DateError),

    /// The start of the range is not strictly before the end
    #[error("The range start `{min}` must be before the range end `{max}`")]
    NotAscending {
        min: CalendarDate,
        max: CalendarDate,
    },

    /// The text is not of the form `min,max`
    #[error("`{0}` is not a `min,max` date range")]
    InvalidFormat(String),
}

/// Where the current date is relative to the range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangePosition {
    Below,
    Within,
    Above,
}

/// Parse a `min,max` date range (e.g. `1800-01-01,2022-01-01`).  The dates
/// are validated but their order isn't checked.
pub fn parse_range(text: &str) -> Result<(CalendarDate, CalendarDate), RangeError> {
    let Some((min, max)) = text.split_once(',') else {
        return Err(RangeError::InvalidFormat(text.to_string()));
    };
    let min = min.to_calendar_date().map_err(RangeError::InvalidEndpoint)?;
    let max = max.to_calendar_date().map_err(RangeError::InvalidEndpoint)?;
    Ok((min, max))
}

/// Ensure the range is strictly ascending (by decimal date)
fn check_ascending(min: CalendarDate, max: CalendarDate) -> Result<(), RangeError> {
    if min.to_decimal() >= max.to_decimal() {
        Err(RangeError::NotAscending { min, max })
    } else {
        Ok(())
    }
}

/// The current date and the slider's date range.
///
/// Once any public method returns, `range_min < range_max` and the date is
/// within `[range_min, range_max]` (all by decimal date).  A rejected change
/// leaves the state exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeDateState {
    date: CalendarDate,
    range_min: CalendarDate,
    range_max: CalendarDate,
}

impl RangeDateState {
    /// Create the state.  The range must be ascending; a date outside of it
    /// widens the range (as [`RangeDateState::set_date`] does).
    pub fn new(
        range_min: CalendarDate,
        range_max: CalendarDate,
        date: CalendarDate,
    ) -> Result<Self, RangeError> {
        check_ascending(range_min, range_max)?;
        let mut state = RangeDateState {
            date: range_min,
            range_min,
            range_max,
        };
        state.place_date(date);
        Ok(state)
    }

    /// The current date
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// The current date as a decimal date
    pub fn decimal_date(&self) -> f64 {
        self.date.to_decimal()
    }

    /// The (min, max) of the range
    pub fn range(&self) -> (CalendarDate, CalendarDate) {
        (self.range_min, self.range_max)
    }

    /// The (min, max) of the range as decimal dates
    pub fn decimal_range(&self) -> (f64, f64) {
        (self.range_min.to_decimal(), self.range_max.to_decimal())
    }

    /// Where the current date is relative to the range
    pub fn check_out_of_range(&self) -> RangePosition {
        let date = self.decimal_date();
        let (min, max) = self.decimal_range();
        if date < min {
            RangePosition::Below
        } else if date > max {
            RangePosition::Above
        } else {
            RangePosition::Within
        }
    }

    /// Set the current date.  If it's outside of the range, the range is
    /// widened to include it.
    pub fn set_date<D>(&mut self, new_date: &D) -> Result<(), DateError>
    where
        D: ToCalendarDate + ?Sized,
    {
        let new_date = new_date.to_calendar_date().inspect_err(|error| {
            warn!("Rejected date: {error}");
        })?;
        self.place_date(new_date);
        Ok(())
    }

    /// Set the range.  If the current date is outside of the new range, it is
    /// moved to the nearer end of it.
    pub fn set_range<D>(&mut self, new_min: &D, new_max: &D) -> Result<(), RangeError>
    where
        D: ToCalendarDate + ?Sized,
    {
        let parsed = new_min
            .to_calendar_date()
            .and_then(|min| Ok((min, new_max.to_calendar_date()?)))
            .map_err(RangeError::InvalidEndpoint)
            .and_then(|(min, max)| check_ascending(min, max).map(|()| (min, max)));
        let (min, max) = parsed.inspect_err(|error| warn!("Rejected range: {error}"))?;

        self.range_min = min;
        self.range_max = max;
        match self.check_out_of_range() {
            RangePosition::Below => self.date = min,
            RangePosition::Above => self.date = max,
            RangePosition::Within => (),
        }
        debug!("Range set to {min} - {max}, date is {}", self.date);
        Ok(())
    }

    /// The date `amount` units on from the current date (it isn't set)
    pub fn step_by(&self, unit: StepUnit, amount: i64) -> Result<CalendarDate, DateError> {
        step_by(&self.date, unit, amount)
    }

    /// The supported stepping units
    pub fn list_supported_stepping_units() -> &'static [StepUnit] {
        &StepUnit::ALL
    }

    fn place_date(&mut self, date: CalendarDate) {
        self.date = date;
        match self.check_out_of_range() {
            RangePosition::Below => self.range_min = date,
            RangePosition::Above => self.range_max = date,
            RangePosition::Within => (),
        }
        debug!(
            "Date set to {date}, range is {} - {}",
            self.range_min, self.range_max
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use open_timeslider_core::date;

    fn sample_state() -> RangeDateState {
        RangeDateState::new(date!("1800-01-01"), date!("2022-01-01"), date!("1900-06-15")).unwrap()
    }

    #[test]
    fn new() {
        assert!(RangeDateState::new(date!("1800-01-01"), date!("1800-01-01"), date!("1800-01-01")).is_err());
        assert!(RangeDateState::new(date!("2000-01-01"), date!("1800-01-01"), date!("1900-01-01")).is_err());

        // A date outside of the range widens it
        let state = RangeDateState::new(date!("1800-01-01"), date!("2022-01-01"), date!("2023-05-05")).unwrap();
        assert_eq!(state.range(), (date!("1800-01-01"), date!("2023-05-05")));
    }

    #[test]
    fn set_date_widens_the_range() {
        let mut state = sample_state();
        state.set_date("1700-01-01").unwrap();
        assert_eq!(state.date(), date!("1700-01-01"));
        assert_eq!(state.range(), (date!("1700-01-01"), date!("2022-01-01")));

        state.set_date("2100-12-31").unwrap();
        assert_eq!(state.range(), (date!("1700-01-01"), date!("2100-12-31")));

        // Within the range leaves it alone
        state.set_date(&date!("1950-01-01")).unwrap();
        assert_eq!(state.date(), date!("1950-01-01"));
        assert_eq!(state.range(), (date!("1700-01-01"), date!("2100-12-31")));
    }

    #[test]
    fn set_date_across_bce() {
        let mut state = sample_state();
        state.set_date("-0044-03-15").unwrap();
        assert_eq!(state.range().0, date!("-0044-03-15"));
        assert_eq!(state.check_out_of_range(), RangePosition::Within);
    }

    #[test]
    fn invalid_date_changes_nothing() {
        let mut state = sample_state();
        let before = state;
        assert!(state.set_date("2023-02-29").is_err());
        assert!(state.set_date("0000-01-01").is_err());
        assert!(state.set_date("yesterday").is_err());
        assert!(state.set_date(&String::from("1999-13-01")).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn set_range_clamps_the_date() {
        // Date below the new range goes to the new min
        let mut state = sample_state();
        state.set_range("1950-01-01", "2000-01-01").unwrap();
        assert_eq!(state.date(), date!("1950-01-01"));

        // Date above the new range goes to the new max
        let mut state = sample_state();
        state.set_range("1600-01-01", "1700-01-01").unwrap();
        assert_eq!(state.date(), date!("1700-01-01"));

        // Date within the new range stays put
        let mut state = sample_state();
        state.set_range("1850-01-01", "1950-01-01").unwrap();
        assert_eq!(state.date(), date!("1900-06-15"));
        assert_eq!(state.range(), (date!("1850-01-01"), date!("1950-01-01")));
    }

    #[test]
    fn invalid_range_changes_nothing() {
        let mut state = sample_state();
        let before = state;

        assert_eq!(
            state.set_range("2000-01-01", "2000-01-01"),
            Err(RangeError::NotAscending {
                min: date!("2000-01-01"),
                max: date!("2000-01-01")
            })
        );
        assert!(state.set_range("2000-01-01", "1999-12-31").is_err());
        assert!(state.set_range("1-01-01", "-1-12-31").is_err());
        assert!(matches!(
            state.set_range("2000-01-01", "2000-02-30"),
            Err(RangeError::InvalidEndpoint(_))
        ));
        assert!(state.set_range("bad", "2000-01-01").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn decimals() {
        let mut state = sample_state();
        state.set_range("1800-01-01", "2022-01-01").unwrap();
        state.set_date("2022-01-01").unwrap();
        assert_eq!(state.decimal_date(), 2022.00137);
        let (min, max) = state.decimal_range();
        assert!(min < max);
        assert_eq!(max, 2022.00137);
    }

    #[test]
    fn stepping() {
        let state = sample_state();
        assert_eq!(state.step_by(StepUnit::Year, 10), Ok(date!("1910-06-15")));
        assert_eq!(state.step_by(StepUnit::Month, -6), Ok(date!("1899-12-15")));
        assert_eq!(state.step_by(StepUnit::Day, 16), Ok(date!("1900-07-01")));

        // Unchanged, the caller decides whether to set the date
        assert_eq!(state.date(), date!("1900-06-15"));
        assert_eq!(RangeDateState::list_supported_stepping_units().len(), 3);
    }

    #[test]
    fn ranges_from_text() {
        assert_eq!(
            parse_range("1800-01-01,2022-01-01"),
            Ok((date!("1800-01-01"), date!("2022-01-01")))
        );
        assert_eq!(
            parse_range("-0500-01-01, 0500-01-01"),
            Ok((date!("-0500-01-01"), date!("0500-01-01")))
        );
        assert!(parse_range("1800-01-01").is_err());
        assert!(parse_range("1800-01-01,nope").is_err());
    }
}
