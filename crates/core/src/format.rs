// SPDX-License-Identifier: MIT

//!
//! Human readable date formats
//!

use crate::{CalendarDate, DateError, ToCalendarDate};
use serde::{Deserialize, Serialize};

/// The order in which the day and month are written in short dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// dd/mm/yyyy
    #[default]
    Dmy,

    /// mm/dd/yyyy
    Mdy,
}

impl DateFormat {
    /// e.g. `dd/mm/yyyy`
    pub fn placeholder(&self) -> &'static str {
        match self {
            DateFormat::Dmy => "dd/mm/yyyy",
            DateFormat::Mdy => "mm/dd/yyyy",
        }
    }
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The year as written for people, e.g. `44 BCE`
fn era_year(date: &CalendarDate) -> (u32, &'static str) {
    let year = date.year();
    let suffix = if year.is_bce() { " BCE" } else { "" };
    (year.value().unsigned_abs(), suffix)
}

impl CalendarDate {
    /// e.g. 1 Jan 2022, 15 Mar 44 BCE
    pub fn as_long_date_format(&self) -> String {
        let (year, era) = era_year(self);
        let month = MONTH_ABBREVIATIONS[usize::from(self.month().value() - 1)];
        format!("{} {month} {year}{era}", self.day())
    }

    /// dd/mm/yyyy or mm/dd/yyyy format
    pub fn as_short_date_format(&self, format: DateFormat) -> String {
        let (year, era) = era_year(self);
        let day = self.day().value();
        let month = self.month().value();
        match format {
            DateFormat::Dmy => format!("{day:02}/{month:02}/{year}{era}"),
            DateFormat::Mdy => format!("{month:02}/{day:02}/{year}{era}"),
        }
    }
}

/// Parse a date typed in by a user: either `[-]YYYY-MM-DD`, or a slash
/// separated date in the given order (e.g. `4/7/1776`, `07/04/-1776`)
pub fn parse_user_date(input: &str, format: DateFormat) -> Result<CalendarDate, DateError> {
    let input = input.trim();
    let bits: Vec<&str> = input.split('/').map(str::trim).collect();
    let [first, second, year] = bits.as_slice() else {
        return input.to_calendar_date();
    };

    let (day, month) = match format {
        DateFormat::Dmy => (first, second),
        DateFormat::Mdy => (second, first),
    };
    let (sign, year) = match year.strip_prefix('-') {
        Some(year) => ("-", year),
        None => ("", *year),
    };
    format!("{sign}{year:0>4}-{month:0>2}-{day:0>2}")
        .to_calendar_date()
        .map_err(|_| DateError::InvalidFormat(input.to_string()))
}
