// SPDX-License-Identifier: MIT

//!
//! *Part of the wider OpenTimeslider project*
//!
//! Command line access to OpenTimeslider: decimal date conversion, stepping,
//! and date filtering of MapLibre style documents
//!

use clap::{Args, Parser, Subcommand};
use log::info;
use open_timeslider::{TimeSlider, TimeSliderOptions, parse_range};
use open_timeslider_core::{CalendarDate, StepAmount, to_calendar_date};
use open_timeslider_filter::{LayerId, RendererPort, StyleDocument, layers_showing};
use serde_json::Value;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::time::Duration;

/// OpenTimeslider entry point
fn main() {
    let args = Cli::parse();

    // Setup logging
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("open_timeslider")
        .add_filter_allow_str("timeslider")
        .build();
    if let Err(error) = CombinedLogger::init(vec![TermLogger::new(
        level,
        config_log,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]) {
        eprintln!("Error setting up logging: {error}");
    }

    if let Err(error) = run(args.command) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

/// OpenTimeslider CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "OpenTimeslider tool for decimal dates and date filtered map styles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log what's happening
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a YYYY-MM-DD date to a decimal date
    ToDecimal {
        #[arg(allow_hyphen_values = true)]
        date: CalendarDate,
    },

    /// Convert a decimal date to a YYYY-MM-DD date
    ToDate {
        #[arg(allow_negative_numbers = true)]
        decimal: f64,
    },

    /// Step a date by an amount (e.g. 10year, 1month, 1day)
    Step {
        #[arg(allow_hyphen_values = true)]
        date: CalendarDate,

        amount: StepAmount,

        /// Step backwards
        #[arg(long)]
        back: bool,
    },

    /// Filter a style's layers to the date and write the filtered style
    Filter {
        #[command(flatten)]
        session: SessionArgs,

        /// Where to write the filtered style (printed if not given)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the features visible on the date, with the layers that show them
    Visible {
        #[command(flatten)]
        session: SessionArgs,

        /// Path to a GeoJSON feature collection
        #[arg(long)]
        features: PathBuf,
    },

    /// Autoplay: step the date a number of times, pausing the step interval
    /// between steps
    Play {
        #[command(flatten)]
        session: SessionArgs,

        /// How many steps to take
        #[arg(long, default_value_t = 10)]
        ticks: u32,

        /// Override the configured step amount
        #[arg(long)]
        step: Option<StepAmount>,
    },
}

/// What a time slider session is attached to and with
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Path to the MapLibre style JSON
    #[arg(long)]
    pub style: PathBuf,

    /// Path to the JSON options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// The date (overrides the options)
    #[arg(long, allow_hyphen_values = true)]
    pub date: Option<CalendarDate>,

    /// The `min,max` range (overrides the options)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_range)]
    pub range: Option<(CalendarDate, CalendarDate)>,
}

impl SessionArgs {
    /// The options from the config file (if any) with the overrides applied
    fn options(&self) -> Result<TimeSliderOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => TimeSliderOptions::load(path)?,
            None => TimeSliderOptions::default(),
        };
        if let Some(range) = self.range {
            options.range = Some(range);
        }
        if let Some(date) = self.date {
            options.date = Some(date);
        }
        Ok(options)
    }

    /// Attach a session to the style
    fn attach(&self) -> Result<TimeSlider<StyleDocument>, Box<dyn std::error::Error>> {
        let style = StyleDocument::load(&self.style)?;
        Ok(TimeSlider::attach(style, self.options()?)?)
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::ToDecimal { date } => println!("{}", date.to_decimal()),
        Command::ToDate { decimal } => println!("{}", to_calendar_date(decimal)?),
        Command::Step { date, amount, back } => println!("{}", amount.apply(&date, back)?),
        Command::Filter { session, out } => {
            let slider = session.attach()?;
            info!("Filtered to {}", slider.date());
            let style = slider.port();
            match out {
                Some(path) => style.save(&path)?,
                None => println!("{}", style.to_string_pretty()?),
            }
        }
        Command::Visible { session, features } => {
            let slider = session.attach()?;
            let source = &slider.options().vector_source_name;
            let style = slider.port();
            let layer_ids = style.layers_for_source(source)?;
            let collection: Value = serde_json::from_str(&std::fs::read_to_string(features)?)?;

            println!("Visible on {}:", slider.date().as_long_date_format());
            let empty = serde_json::Map::new();
            let features = collection["features"].as_array().into_iter().flatten();
            for (index, feature) in features.enumerate() {
                let properties = feature["properties"].as_object().unwrap_or(&empty);
                let shown_by = layers_showing(style, &layer_ids, properties)?;
                if !shown_by.is_empty() {
                    let name = properties
                        .get("name")
                        .and_then(Value::as_str)
                        .map_or_else(|| format!("#{index}"), String::from);
                    let shown_by: Vec<&str> = shown_by.iter().map(LayerId::as_str).collect();
                    println!("  {name} ({})", shown_by.join(", "));
                }
            }
        }
        Command::Play {
            session,
            ticks,
            step,
        } => {
            let mut slider = session.attach()?;
            if let Some(step) = step {
                slider.set_step_amount(step)?;
            }
            let interval = Duration::from_secs_f64(slider.step_interval());
            println!("{}", slider.date());
            for _ in 0..ticks {
                std::thread::sleep(interval);
                if !slider.step_forward()? {
                    break;
                }
                println!("{}", slider.date());
            }
            slider.detach().map_err(|(_, error)| error)?;
        }
    }
    Ok(())
}
