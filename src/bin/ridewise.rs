//! RideWise command line: predict bike-sharing demand for one set of
//! weather and calendar conditions.
//!
//! Unset calendar options default to the current date and hour, mirroring
//! the interactive form the estimator was designed around:
//!
//! ```bash
//! ridewise --model xgb_tuned_model.json --temp 0.5 --hum 0.6 --windspeed 0.3 \
//!     --season winter --weather clear --month 6 --weekday 0 --hour 12 --workingday
//! ```

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Local, Timelike};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use ridewise::demand::DemandForecast;
use ridewise::engine;
use ridewise::observation::{Granularity, RawObservation, Season, WeatherSit, BASE_YEAR};

#[derive(Parser, Debug)]
#[command(name = "ridewise", version)]
#[command(about = "Predict bike-sharing demand from weather and calendar conditions")]
struct Cli {
    /// Path to the trained model artifact (XGBoost JSON)
    #[arg(long, default_value = "xgb_tuned_model.json")]
    model: PathBuf,

    /// Dataset granularity the model was trained on
    #[arg(long, value_enum, default_value_t = GranularityArg::Hourly)]
    granularity: GranularityArg,

    /// Normalized temperature, 0..=1
    #[arg(long, default_value_t = 0.5)]
    temp: f64,

    /// Normalized humidity, 0..=1
    #[arg(long, default_value_t = 0.6)]
    hum: f64,

    /// Normalized windspeed, 0..=1
    #[arg(long, default_value_t = 0.3)]
    windspeed: f64,

    /// Season
    #[arg(long, value_enum, default_value_t = SeasonArg::Winter)]
    season: SeasonArg,

    /// Weather situation
    #[arg(long, value_enum, default_value_t = WeatherArg::Clear)]
    weather: WeatherArg,

    /// Calendar year covered by the model
    #[arg(long, default_value_t = 2011, value_parser = clap::value_parser!(u16).range(2011..=2012))]
    year: u16,

    /// Month, 1..=12 (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    month: Option<u8>,

    /// Day of week, 0 = Monday .. 6 = Sunday (defaults to today)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
    weekday: Option<u8>,

    /// Hour of day, 0..=23; hourly granularity only (defaults to the current hour)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
    hour: Option<u8>,

    /// Day of month for the calendar columns (defaults to today)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=31))]
    day: Option<u8>,

    /// Mark the day a holiday
    #[arg(long)]
    holiday: bool,

    /// Mark the day a working day
    #[arg(long)]
    workingday: bool,

    /// Skip the calendar enrichment columns (year, month, day, dayofweek,
    /// is_weekend) for models trained without them
    #[arg(long)]
    no_calendar: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GranularityArg {
    Hourly,
    Daily,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Hourly => Granularity::Hourly,
            GranularityArg::Daily => Granularity::Daily,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SeasonArg {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl From<SeasonArg> for Season {
    fn from(arg: SeasonArg) -> Self {
        match arg {
            SeasonArg::Winter => Season::Winter,
            SeasonArg::Spring => Season::Spring,
            SeasonArg::Summer => Season::Summer,
            SeasonArg::Fall => Season::Fall,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WeatherArg {
    Clear,
    Mist,
    LightPrecipitation,
    HeavyPrecipitation,
}

impl From<WeatherArg> for WeatherSit {
    fn from(arg: WeatherArg) -> Self {
        match arg {
            WeatherArg::Clear => WeatherSit::Clear,
            WeatherArg::Mist => WeatherSit::Mist,
            WeatherArg::LightPrecipitation => WeatherSit::LightPrecipitation,
            WeatherArg::HeavyPrecipitation => WeatherSit::HeavyPrecipitation,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ridewise=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let now = Local::now();

    let granularity = Granularity::from(cli.granularity);
    let hr = match granularity {
        Granularity::Hourly => Some(cli.hour.unwrap_or(now.hour() as u8)),
        // An explicit hour on daily data passes through so validation can
        // reject it instead of ignoring the flag.
        Granularity::Daily => cli.hour,
    };

    let raw = RawObservation {
        season: cli.season.into(),
        yr: (cli.year - BASE_YEAR) as u8,
        mnth: cli.month.unwrap_or(now.month() as u8),
        holiday: cli.holiday,
        weekday: cli
            .weekday
            .unwrap_or(now.weekday().num_days_from_monday() as u8),
        workingday: cli.workingday,
        weathersit: cli.weather.into(),
        temp: cli.temp,
        hum: cli.hum,
        windspeed: cli.windspeed,
        hr,
    };

    let model = engine::init_global(&cli.model)
        .with_context(|| format!("cannot load demand model from {}", cli.model.display()))?;

    let day_of_month = (!cli.no_calendar).then(|| cli.day.unwrap_or(now.day() as u8));
    let forecast = engine::forecast(model, &raw, granularity, day_of_month)?;

    render(&forecast);
    Ok(())
}

fn render(forecast: &DemandForecast) {
    let level = forecast.level();
    println!("Predicted bike rentals: {} rides", forecast.rides());
    println!(
        "Demand intensity:       {} {:>3.0}%",
        gauge_bar(forecast.gauge(), 20),
        forecast.gauge() * 100.0
    );
    println!(
        "Demand level:           {} ({})",
        level.label(),
        level.advisory()
    );
}

fn gauge_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
