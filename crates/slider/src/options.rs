// SPDX-License-Identifier: MIT

//!
//! Time slider session options
//!

use crate::{RangeDateState, RangeError};
use chrono::Datelike;
use log::info;
use open_timeslider_core::{CalendarDate, DateFormat, StepAmount, StepUnit, Year};
use open_timeslider_filter::TemporalAttributes;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// How many years before the current year the default range starts
const DEFAULT_RANGE_YEARS: i64 = 100;

/// Errors that can arise in relation to the options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Invalid range in options: {0}")]
    InvalidRange(RangeError),

    #[error("The step interval must be a positive number of seconds (not {0})")]
    InvalidStepInterval(f64),

    #[error("Unsupported step amount: {0}")]
    UnsupportedStepAmount(StepAmount),
}

impl From<std::io::Error> for OptionsError {
    fn from(error: std::io::Error) -> Self {
        OptionsError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for OptionsError {
    fn from(error: serde_json::Error) -> Self {
        OptionsError::Json(error.to_string())
    }
}

/// The options a [`crate::TimeSlider`] session is attached with, usually
/// loaded from JSON.  Every field can be left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSliderOptions {
    /// The data source whose layers are filtered
    pub vector_source_name: String,

    /// The slider's initial (min, max).  Defaults to the last century.
    pub range: Option<(CalendarDate, CalendarDate)>,

    /// The initial date.  Defaults to the start of the range.
    pub date: Option<CalendarDate>,

    /// Seconds between autoplay steps
    pub step_interval: f64,

    /// How far each autoplay step jumps
    pub step_amount: StepAmount,

    /// How short dates are written and typed
    pub date_format: DateFormat,

    /// Which feature properties hold the start and end dates
    pub temporal_attributes: TemporalAttributes,
}

impl Default for TimeSliderOptions {
    fn default() -> Self {
        TimeSliderOptions {
            vector_source_name: String::from("osm"),
            range: None,
            date: None,
            step_interval: 5.0,
            step_amount: StepAmount::new(100, StepUnit::Year),
            date_format: DateFormat::default(),
            temporal_attributes: TemporalAttributes::default(),
        }
    }
}

impl TimeSliderOptions {
    /// Load options from a JSON file
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        info!("Loading options from {}", path.display());
        let data = fs::read_to_string(path)?;
        info!("JSON options loaded = {data}");
        let options: TimeSliderOptions = serde_json::from_str(&data)?;
        info!("Options loaded = {options:?}");
        Ok(options)
    }

    /// The configured range, or the default one (1st January a century ago to
    /// the end of this year)
    pub fn range_or_default(&self) -> Result<(CalendarDate, CalendarDate), OptionsError> {
        match self.range {
            Some(range) => Ok(range),
            None => default_range(),
        }
    }

    /// The state the options describe
    pub fn initial_state(&self) -> Result<RangeDateState, OptionsError> {
        let (min, max) = self.range_or_default()?;
        RangeDateState::new(min, max, self.date.unwrap_or(min)).map_err(OptionsError::InvalidRange)
    }

    /// Check the options can start a session
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.step_interval.is_finite() && self.step_interval > 0.0) {
            return Err(OptionsError::InvalidStepInterval(self.step_interval));
        }
        if !StepAmount::PRESETS.contains(&self.step_amount) {
            return Err(OptionsError::UnsupportedStepAmount(self.step_amount));
        }
        self.initial_state()?;
        Ok(())
    }
}

/// From 1st January a century ago to the end of the current (local) year
fn default_range() -> Result<(CalendarDate, CalendarDate), OptionsError> {
    let current = i64::from(chrono::Local::now().year());
    let endpoint = |year: i64| {
        Year::try_from(year).map_err(|error| OptionsError::InvalidRange(RangeError::InvalidEndpoint(error)))
    };
    let min = CalendarDate::first_of_year(endpoint(current - DEFAULT_RANGE_YEARS)?);
    let max = CalendarDate::last_of_year(endpoint(current)?);
    Ok((min, max))
}
