// SPDX-License-Identifier: MIT

//!
//! A time slider session, keeping a renderer's layer filters in step with the
//! current date
//!

use crate::{OptionsError, RangeDateState, TimeSliderError, TimeSliderOptions};
use log::{debug, info, warn};
use open_timeslider_core::{
    CalendarDate, DateFormat, StepAmount, StepUnit, ToCalendarDate, snap_out_of_year_zero,
    to_calendar_date,
};
use open_timeslider_filter::{FilterError, FilterInjector, RendererPort};
use serde::Serialize;

/// The slider step size: roughly one day
pub const ONE_DAY_STEP: f64 = 1.0 / 365.0;

/// Events that the application might be interested in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TimeSliderEvent {
    /// The session is attached and filtering
    Ready,

    /// The current date changed (to this)
    DateChanged(CalendarDate),

    /// The range changed (to this min & max)
    RangeChanged(CalendarDate, CalendarDate),
}

/// A time slider attached to a renderer.
///
/// While attached, every layer drawn from the configured data source only
/// shows the features that exist on the current date.
#[derive(Debug)]
pub struct TimeSlider<P: RendererPort> {
    /// The host renderer
    port: P,

    options: TimeSliderOptions,

    /// The current date & range
    state: RangeDateState,

    /// Owns the temporal clause installed in the renderer's filters
    injector: FilterInjector,

    /// All events that an external programme might be interested in
    events: Vec<TimeSliderEvent>,
}

impl<P: RendererPort> TimeSlider<P> {
    /// Attach to the renderer: install the temporal filters and apply them for
    /// the initial date.  Nothing is left installed if this fails.
    pub fn attach(mut port: P, options: TimeSliderOptions) -> Result<Self, TimeSliderError> {
        info!("Attaching time slider to source `{}`", options.vector_source_name);
        options.validate()?;
        let state = options.initial_state()?;

        let mut injector = FilterInjector::new(options.temporal_attributes.clone());
        injector.install(&mut port, &options.vector_source_name)?;
        if let Err(error) = injector.apply(&mut port, state.decimal_date()) {
            warn!("Failed to apply the initial temporal filter: {error}");
            if let Err(error) = injector.uninstall(&mut port) {
                warn!("Failed to remove the temporal filters: {error}");
            }
            return Err(error.into());
        }

        info!(
            "Time slider ready at {} ({} - {})",
            state.date(),
            state.range().0,
            state.range().1
        );
        Ok(TimeSlider {
            port,
            options,
            state,
            injector,
            events: vec![TimeSliderEvent::Ready],
        })
    }

    /// Remove the temporal filters (restoring the originals) and hand back the
    /// renderer.
    ///
    /// If any layer can't be restored the session is handed back with the
    /// error.  It still holds the originals of those layers, so detaching can
    /// be tried again.
    pub fn detach(mut self) -> Result<P, (Self, FilterError)> {
        info!("Detaching time slider");
        match self.injector.uninstall(&mut self.port) {
            Ok(()) => Ok(self.port),
            Err(error) => Err((self, error)),
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// The renderer, e.g. for the host to change its style
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn options(&self) -> &TimeSliderOptions {
        &self.options
    }

    pub fn state(&self) -> &RangeDateState {
        &self.state
    }

    pub fn date(&self) -> CalendarDate {
        self.state.date()
    }

    pub fn decimal_date(&self) -> f64 {
        self.state.decimal_date()
    }

    pub fn range(&self) -> (CalendarDate, CalendarDate) {
        self.state.range()
    }

    pub fn decimal_range(&self) -> (f64, f64) {
        self.state.decimal_range()
    }

    pub fn date_format(&self) -> DateFormat {
        self.options.date_format
    }

    /// Set the current date (widening the range if needed) and re-filter.
    /// If re-filtering fails the date is left as it was.
    pub fn set_date<D>(&mut self, new_date: &D) -> Result<(), TimeSliderError>
    where
        D: ToCalendarDate + ?Sized,
    {
        let mut state = self.state;
        state.set_date(new_date)?;

        let old_range = self.state.range();
        self.commit(state)?;
        let (min, max) = state.range();
        if (min, max) != old_range {
            self.events.push(TimeSliderEvent::RangeChanged(min, max));
        }
        self.events.push(TimeSliderEvent::DateChanged(state.date()));
        Ok(())
    }

    /// Set the range (moving the date into it if needed) and re-filter.  If
    /// re-filtering fails the range is left as it was.
    pub fn set_range<D>(&mut self, new_min: &D, new_max: &D) -> Result<(), TimeSliderError>
    where
        D: ToCalendarDate + ?Sized,
    {
        let mut state = self.state;
        state.set_range(new_min, new_max)?;

        let old_date = self.state.date();
        self.commit(state)?;
        if state.date() != old_date {
            self.events.push(TimeSliderEvent::DateChanged(state.date()));
        }
        let (min, max) = state.range();
        self.events.push(TimeSliderEvent::RangeChanged(min, max));
        Ok(())
    }

    /// Go back to the start of the range
    pub fn reset(&mut self) -> Result<(), TimeSliderError> {
        let (min, _) = self.state.range();
        self.set_date(&min)
    }

    /// Set the date from a raw slider position (a decimal date).  Positions in
    /// the year 0 gap snap to the nearest edge of 1 BCE or 1 CE.
    pub fn set_date_from_slider(&mut self, position: f64) -> Result<(), TimeSliderError> {
        let date = to_calendar_date(snap_out_of_year_zero(position))?;
        self.set_date(&date)
    }

    /// Where the current date is along the range, from 0 (the start) to 1
    pub fn slider_fraction(&self) -> f64 {
        let (min, max) = self.decimal_range();
        ((self.decimal_date() - min) / (max - min)).clamp(0.0, 1.0)
    }

    pub fn step_amount(&self) -> StepAmount {
        self.options.step_amount
    }

    /// Set the step amount, one of [`StepAmount::PRESETS`]
    pub fn set_step_amount(&mut self, step_amount: StepAmount) -> Result<(), OptionsError> {
        if !StepAmount::PRESETS.contains(&step_amount) {
            warn!("Rejected step amount: {step_amount}");
            return Err(OptionsError::UnsupportedStepAmount(step_amount));
        }
        debug!("Step amount set to {step_amount}");
        self.options.step_amount = step_amount;
        Ok(())
    }

    /// Seconds between autoplay steps
    pub fn step_interval(&self) -> f64 {
        self.options.step_interval
    }

    pub fn set_step_interval(&mut self, seconds: f64) -> Result<(), OptionsError> {
        if !(seconds.is_finite() && seconds > 0.0) {
            warn!("Rejected step interval: {seconds}");
            return Err(OptionsError::InvalidStepInterval(seconds));
        }
        debug!("Step interval set to {seconds}s");
        self.options.step_interval = seconds;
        Ok(())
    }

    /// Move the date forward by the step amount.  Returns whether the date
    /// changed.
    pub fn step_forward(&mut self) -> Result<bool, TimeSliderError> {
        self.step(false)
    }

    /// Move the date back by the step amount.  Returns whether the date
    /// changed.
    pub fn step_back(&mut self) -> Result<bool, TimeSliderError> {
        self.step(true)
    }

    fn step(&mut self, backwards: bool) -> Result<bool, TimeSliderError> {
        let new_date = self.options.step_amount.apply(&self.state.date(), backwards)?;
        if new_date.to_decimal() == self.decimal_date() {
            return Ok(false);
        }
        self.set_date(&new_date)?;
        Ok(true)
    }

    /// The supported stepping units
    pub fn list_supported_stepping_units() -> &'static [StepUnit] {
        RangeDateState::list_supported_stepping_units()
    }

    /// Get all events for dispatching & handling
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, TimeSliderEvent> {
        self.events.drain(..)
    }

    /// Filter the renderer for the new state, then take it on.  A failure
    /// re-applies the current state's filters and keeps the current state.
    fn commit(&mut self, state: RangeDateState) -> Result<(), FilterError> {
        if let Err(error) = self.injector.apply(&mut self.port, state.decimal_date()) {
            warn!("Failed to filter for {}: {error}", state.date());
            if let Err(error) = self.injector.apply(&mut self.port, self.state.decimal_date()) {
                warn!("Failed to put back the filters for {}: {error}", self.state.date());
            }
            return Err(error);
        }
        self.state = state;
        Ok(())
    }
}
