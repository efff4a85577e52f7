// SPDX-License-Identifier: MIT

//!
//! Proleptic Gregorian calendar queries
//!
//! The Gregorian leap year rule is applied to the arithmetic year without any
//! Julian cutover, into the past and the future alike.
//!

/// Number of days in each month of a common (non-leap) year
const DAYS_PER_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Whether the year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    let year = i64::from(year);
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// The number of days in the month, or `None` if the month isn't `1..=12`
pub fn days_in_month(year: i32, month: u8) -> Option<u8> {
    let days = *DAYS_PER_MONTH.get(usize::from(month).checked_sub(1)?)?;
    if month == 2 && is_leap_year(year) {
        Some(days + 1)
    } else {
        Some(days)
    }
}

/// The number of days in the year (365 or 366)
pub fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Whether the day exists in the given month of the given year
pub fn is_valid_month_day(year: i32, month: u8, day: u8) -> bool {
    match days_in_month(year, month) {
        Some(max) => (1..=max).contains(&day),
        None => false,
    }
}

/// The zero-based day of the year (1st January is 0).  The month and day must
/// already have been validated.
pub(crate) fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    let days_before: u16 = (1..month)
        .filter_map(|m| days_in_month(year, m))
        .map(u16::from)
        .sum();
    days_before + u16::from(day) - 1
}

/// The (month, day) of a zero-based day of the year.  Values beyond the end of
/// the year land on 31st December.
pub(crate) fn month_day_from_day_of_year(year: i32, day_of_year: u16) -> (u8, u8) {
    let mut remaining = day_of_year;
    for month in 1..=12 {
        let days = u16::from(days_in_month(year, month).unwrap_or(31));
        if remaining < days {
            return (month, remaining as u8 + 1);
        }
        remaining -= days;
    }
    (12, 31)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));

        // Proleptic, arithmetic year
        assert!(is_leap_year(-4));
        assert!(is_leap_year(-400));
        assert!(!is_leap_year(-100));
        assert!(!is_leap_year(-1));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_year(1900), 365);
        assert_eq!(days_in_year(2000), 366);
    }

    #[test]
    fn month_days() {
        assert!(is_valid_month_day(2024, 2, 29));
        assert!(!is_valid_month_day(2023, 2, 29));
        assert!(!is_valid_month_day(2023, 4, 31));
        assert!(!is_valid_month_day(2023, 1, 0));
        assert!(!is_valid_month_day(2023, 13, 1));
    }

    #[test]
    fn day_of_year_walk() {
        for year in [-401, -4, 1, 1900, 2000, 2023] {
            for doy in 0..days_in_year(year) {
                let (month, day) = month_day_from_day_of_year(year, doy);
                assert_eq!(day_of_year(year, month, day), doy);
            }
        }
        assert_eq!(month_day_from_day_of_year(2023, 31), (2, 1));
        assert_eq!(month_day_from_day_of_year(2024, 59), (2, 29));
        assert_eq!(month_day_from_day_of_year(2023, 59), (3, 1));
        assert_eq!(month_day_from_day_of_year(2023, 400), (12, 31));
    }
}
