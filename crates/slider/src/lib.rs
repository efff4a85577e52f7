// SPDX-License-Identifier: MIT

//!
//! *Part of the wider OpenTimeslider project*
//!
//! This crate drives a date-filtered historical map:
//!
//! - [`RangeDateState`] holds the current date and the date range of the
//!   slider, and keeps the date within the range after every change
//! - [`TimeSlider`] is a session owning that state and a renderer, keeping
//!   the renderer's layer filters in step with the current date
//! - [`TimeSliderOptions`] is the (JSON) configuration of a session
//!
//! Presentation (panels, buttons, translations, timers) is left to the
//! application; it feeds raw user input in through the setters, which are the
//! only validation gate.
//!

mod options;
mod session;
mod state;

pub use options::*;
pub use session::*;
pub use state::*;

use open_timeslider_core::DateError;
use open_timeslider_filter::FilterError;
use thiserror::Error;

/// Errors that can be returned by a [`TimeSlider`] session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeSliderError {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Options(#[from] OptionsError),
}
