// SPDX-License-Identifier: MIT

//!
//! Calendar-correct stepping by days, months and years
//!

use crate::calendar::{day_of_year, days_in_year, month_day_from_day_of_year};
use crate::{CalendarDate, DateError, Month, Year};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The units a date can be stepped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepUnit {
    Day,
    Month,
    Year,
}

impl StepUnit {
    /// Every supported stepping unit
    pub const ALL: [StepUnit; 3] = [StepUnit::Day, StepUnit::Month, StepUnit::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepUnit::Day => "day",
            StepUnit::Month => "month",
            StepUnit::Year => "year",
        }
    }
}

impl fmt::Display for StepUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far to jump per step, written as e.g. `10year` or `1month`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepAmount {
    pub amount: u32,
    pub unit: StepUnit,
}

impl StepAmount {
    /// The step amounts offered for autoplay
    pub const PRESETS: [StepAmount; 5] = [
        StepAmount::new(1, StepUnit::Day),
        StepAmount::new(1, StepUnit::Month),
        StepAmount::new(1, StepUnit::Year),
        StepAmount::new(10, StepUnit::Year),
        StepAmount::new(100, StepUnit::Year),
    ];

    pub const fn new(amount: u32, unit: StepUnit) -> Self {
        StepAmount { amount, unit }
    }

    /// Step the date forward (or back) by this amount
    pub fn apply(&self, date: &CalendarDate, backwards: bool) -> Result<CalendarDate, DateError> {
        let amount = i64::from(self.amount);
        step_by(date, self.unit, if backwards { -amount } else { amount })
    }
}

impl fmt::Display for StepAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}

/// Errors parsing a [`StepAmount`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a step amount (e.g. 1day, 1month, 10year)")]
pub struct StepAmountError(String);

impl FromStr for StepAmount {
    type Err = StepAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StepAmountError(s.to_string());
        let split = s.find(|c: char| !c.is_ascii_digit()).ok_or_else(invalid)?;
        let (amount, unit) = s.split_at(split);
        let amount: u32 = amount.parse().map_err(|_| invalid())?;
        let unit = StepUnit::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == unit)
            .ok_or_else(invalid)?;
        Ok(StepAmount { amount, unit })
    }
}

impl Serialize for StepAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StepAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(serde::de::Error::custom)
    }
}

/// The year after, skipping year 0
fn next_year(year: i64) -> i64 {
    if year == -1 { 1 } else { year + 1 }
}

/// The year before, skipping year 0
fn previous_year(year: i64) -> i64 {
    if year == 1 { -1 } else { year - 1 }
}

/// Push a year 0 result to 1 when moving forwards, or -1 when moving back
fn skip_year_zero(year: i64, amount: i64) -> i64 {
    match (year, amount >= 0) {
        (0, true) => 1,
        (0, false) => -1,
        _ => year,
    }
}

/// Step a date by a signed amount of the unit.
///
/// Months and years are stepped with signed arithmetic on the (year, month)
/// and a landing year 0 is pushed to 1 or -1 in the direction of travel.  The
/// day is then clamped to the length of the landing month so that, for
/// example, 31st January plus a month is the last day of February.  Days are
/// counted out using the real length of every year passed through.
pub fn step_by(date: &CalendarDate, unit: StepUnit, amount: i64) -> Result<CalendarDate, DateError> {
    match unit {
        StepUnit::Day => step_days(date, amount),
        StepUnit::Month => {
            let months = i64::from(date.year().value()) * 12
                + i64::from(date.month().value() - 1)
                + amount;
            let year = skip_year_zero(months.div_euclid(12), amount);
            let month = months.rem_euclid(12) + 1;
            Ok(CalendarDate::clamped(
                Year::try_from(year)?,
                Month::try_from(month)?,
                date.day().value(),
            ))
        }
        StepUnit::Year => {
            let year = i64::from(date.year().value())
                .checked_add(amount)
                .ok_or(DateError::InvalidYear(i64::MAX))?;
            let year = skip_year_zero(year, amount);
            Ok(CalendarDate::clamped(
                Year::try_from(year)?,
                date.month(),
                date.day().value(),
            ))
        }
    }
}

fn step_days(date: &CalendarDate, amount: i64) -> Result<CalendarDate, DateError> {
    let mut year = i64::from(date.year().value());
    let mut index = i64::from(day_of_year(
        date.year().value(),
        date.month().value(),
        date.day().value(),
    )) + amount;

    // Hop whole years until the index lands inside the current one
    while index < 0 {
        year = previous_year(year);
        Year::try_from(year)?;
        index += i64::from(days_in_year(year as i32));
    }
    loop {
        let days = i64::from(days_in_year(Year::try_from(year)?.value()));
        if index < days {
            break;
        }
        index -= days;
        year = next_year(year);
    }

    let year = Year::try_from(year)?;
    let (month, day) = month_day_from_day_of_year(year.value(), index as u16);
    CalendarDate::from_ymd(i64::from(year.value()), i64::from(month), i64::from(day))
}

#[cfg(test)]
mod test {
    use super::*;

    fn ymd(year: i64, month: i64, day: i64) -> CalendarDate {
        CalendarDate::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn days() {
        assert_eq!(step_by(&ymd(2023, 12, 31), StepUnit::Day, 1), Ok(ymd(2024, 1, 1)));
        assert_eq!(step_by(&ymd(2024, 2, 28), StepUnit::Day, 1), Ok(ymd(2024, 2, 29)));
        assert_eq!(step_by(&ymd(2023, 2, 28), StepUnit::Day, 1), Ok(ymd(2023, 3, 1)));
        assert_eq!(step_by(&ymd(2024, 3, 1), StepUnit::Day, -1), Ok(ymd(2024, 2, 29)));
        assert_eq!(step_by(&ymd(2000, 1, 1), StepUnit::Day, 366), Ok(ymd(2001, 1, 1)));
        assert_eq!(step_by(&ymd(2000, 1, 1), StepUnit::Day, 0), Ok(ymd(2000, 1, 1)));

        // Across the BCE/CE boundary
        assert_eq!(step_by(&ymd(-1, 12, 31), StepUnit::Day, 1), Ok(ymd(1, 1, 1)));
        assert_eq!(step_by(&ymd(1, 1, 1), StepUnit::Day, -1), Ok(ymd(-1, 12, 31)));
        assert_eq!(step_by(&ymd(-1, 12, 30), StepUnit::Day, 367), Ok(ymd(2, 1, 1)));
    }

    #[test]
    fn months() {
        assert_eq!(step_by(&ymd(2023, 1, 31), StepUnit::Month, 1), Ok(ymd(2023, 2, 28)));
        assert_eq!(step_by(&ymd(2024, 1, 31), StepUnit::Month, 1), Ok(ymd(2024, 2, 29)));
        assert_eq!(step_by(&ymd(2023, 12, 15), StepUnit::Month, 1), Ok(ymd(2024, 1, 15)));
        assert_eq!(step_by(&ymd(2023, 1, 15), StepUnit::Month, -1), Ok(ymd(2022, 12, 15)));
        assert_eq!(step_by(&ymd(2023, 3, 31), StepUnit::Month, -13), Ok(ymd(2022, 2, 28)));

        // Landing in year 0 is pushed on in the direction of travel
        assert_eq!(step_by(&ymd(-1, 12, 1), StepUnit::Month, 1), Ok(ymd(1, 1, 1)));
        assert_eq!(step_by(&ymd(1, 1, 1), StepUnit::Month, -1), Ok(ymd(-1, 12, 1)));
    }

    #[test]
    fn years() {
        assert_eq!(step_by(&ymd(2024, 2, 29), StepUnit::Year, 1), Ok(ymd(2025, 2, 28)));
        assert_eq!(step_by(&ymd(2024, 2, 29), StepUnit::Year, 4), Ok(ymd(2028, 2, 29)));
        assert_eq!(step_by(&ymd(1900, 6, 1), StepUnit::Year, -100), Ok(ymd(1800, 6, 1)));
        assert_eq!(step_by(&ymd(-1, 6, 1), StepUnit::Year, 1), Ok(ymd(1, 6, 1)));
        assert_eq!(step_by(&ymd(1, 6, 1), StepUnit::Year, -1), Ok(ymd(-1, 6, 1)));
        assert_eq!(step_by(&ymd(-10, 6, 1), StepUnit::Year, 10), Ok(ymd(1, 6, 1)));
        assert!(step_by(&ymd(999_999, 1, 1), StepUnit::Year, 1).is_err());
    }

    #[test]
    fn year_zero_is_counted() {
        // Month and year steps count year 0, then push off it, so two
        // different steps can land on the same date
        let start = ymd(-1, 1, 1);
        assert_eq!(step_by(&start, StepUnit::Month, 12), Ok(ymd(1, 1, 1)));
        assert_eq!(step_by(&start, StepUnit::Month, 24), Ok(ymd(1, 1, 1)));
        assert_eq!(step_by(&start, StepUnit::Year, 1), Ok(ymd(1, 1, 1)));
        assert_eq!(step_by(&start, StepUnit::Year, 2), Ok(ymd(1, 1, 1)));
        assert_eq!(step_by(&ymd(1, 1, 1), StepUnit::Year, -2), Ok(ymd(-1, 1, 1)));

        // Day steps skip year 0 entirely
        assert_eq!(step_by(&start, StepUnit::Day, 365), Ok(ymd(1, 1, 1)));
    }

    #[test]
    fn step_amounts() {
        assert_eq!(
            "10year".parse::<StepAmount>(),
            Ok(StepAmount::new(10, StepUnit::Year))
        );
        assert_eq!(
            "1day".parse::<StepAmount>(),
            Ok(StepAmount::new(1, StepUnit::Day))
        );
        assert!("year".parse::<StepAmount>().is_err());
        assert!("10".parse::<StepAmount>().is_err());
        assert!("10 years".parse::<StepAmount>().is_err());
        assert!("-1day".parse::<StepAmount>().is_err());
        for preset in StepAmount::PRESETS {
            assert_eq!(preset.to_string().parse::<StepAmount>(), Ok(preset));
        }

        let step = StepAmount::new(100, StepUnit::Year);
        assert_eq!(step.apply(&ymd(1900, 1, 1), false), Ok(ymd(2000, 1, 1)));
        assert_eq!(step.apply(&ymd(1900, 1, 1), true), Ok(ymd(1800, 1, 1)));
    }
}
