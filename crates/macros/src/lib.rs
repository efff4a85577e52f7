// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider OpenTimeslider project*
//!
//! This crate contains the OpenTimeslider procedural macros
//!

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

// TODO: these are copied from `open_timeslider_core` (so are not synced)
const MIN_YEAR: i64 = -999_999;
const MAX_YEAR: i64 = 999_999;

fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Split `[-]Y+-MM-DD` into its checked (year, month, day)
fn parse_date(text: &str) -> Result<(i64, i64, i64), String> {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text),
    };
    let parts: Vec<&str> = rest.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(format!("`{text}` is not a YYYY-MM-DD date"));
    };
    if month.len() != 2 || day.len() != 2 {
        return Err(format!("`{text}` is not a YYYY-MM-DD date"));
    }

    let number = |part: &str| {
        part.parse::<i64>()
            .map_err(|_| format!("`{text}` is not a YYYY-MM-DD date"))
    };
    let (year, month, day) = (sign * number(year)?, number(month)?, number(day)?);

    if year == 0 {
        return Err(String::from("There is no year 0"));
    }
    if year < MIN_YEAR || year > MAX_YEAR {
        return Err(format!("Year must be between {MIN_YEAR} and {MAX_YEAR}"));
    }
    if !(1..=12).contains(&month) {
        return Err(format!("Month `{month}` is not allowed"));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(format!("Day `{day}` does not exist in {year}-{month:02}"));
    }
    Ok((year, month, day))
}

/// Create a `CalendarDate`, using `date!("1800-01-01")`, with compile time
/// checking of the value.
#[proc_macro]
pub fn date(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);

    let (year, month, day) = match parse_date(&lit.value()) {
        Ok(ymd) => ymd,
        Err(message) => {
            return syn::Error::new_spanned(lit, message)
                .to_compile_error()
                .into();
        }
    };

    quote! {
        CalendarDate::from_ymd(#year, #month, #day).unwrap()
    }
    .into()
}
