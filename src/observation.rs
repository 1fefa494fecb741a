//! Raw form inputs and their domains.
//!
//! A [`RawObservation`] is one snapshot of the user-facing controls:
//! normalized weather readings, calendar selectors, and (for hourly
//! granularity) the hour of day. Every field has a fixed domain taken from
//! the source dataset; [`RawObservation::validate`] rejects anything
//! outside it before feature engineering runs.

use thiserror::Error;

/// First year covered by the source dataset; `yr` is the offset from it.
pub const BASE_YEAR: u16 = 2011;

/// Dataset granularity selected by the user.
///
/// The engineered feature set differs structurally between the two:
/// hourly observations carry an hour of day and grow hour-cycle columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hourly,
    Daily,
}

/// Season selector. Codes follow the source dataset (1 = winter .. 4 = fall).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Season {
    Winter = 1,
    Spring = 2,
    Summer = 3,
    Fall = 4,
}

impl Season {
    /// Numeric code as stored in the dataset.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parse a dataset code.
    pub fn from_code(code: u8) -> Result<Self, ObservationError> {
        match code {
            1 => Ok(Season::Winter),
            2 => Ok(Season::Spring),
            3 => Ok(Season::Summer),
            4 => Ok(Season::Fall),
            _ => Err(ObservationError::OutOfRange {
                field: "season",
                value: code as f64,
                lo: 1.0,
                hi: 4.0,
            }),
        }
    }
}

/// Weather situation selector, ordered by severity (1 = clear .. 4 = heavy
/// rain or snow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WeatherSit {
    Clear = 1,
    Mist = 2,
    LightPrecipitation = 3,
    HeavyPrecipitation = 4,
}

impl WeatherSit {
    /// Numeric code as stored in the dataset.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parse a dataset code.
    pub fn from_code(code: u8) -> Result<Self, ObservationError> {
        match code {
            1 => Ok(WeatherSit::Clear),
            2 => Ok(WeatherSit::Mist),
            3 => Ok(WeatherSit::LightPrecipitation),
            4 => Ok(WeatherSit::HeavyPrecipitation),
            _ => Err(ObservationError::OutOfRange {
                field: "weathersit",
                value: code as f64,
                lo: 1.0,
                hi: 4.0,
            }),
        }
    }
}

/// One snapshot of the prediction form.
///
/// Continuous fields are pre-normalized to `[0, 1]` by the original data
/// preparation; this type does not re-scale them. `weekday` counts from
/// Monday (0 = Monday, 6 = Sunday).
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub season: Season,
    /// Year offset from [`BASE_YEAR`]: 0 or 1.
    pub yr: u8,
    /// Calendar month, 1..=12.
    pub mnth: u8,
    pub holiday: bool,
    /// Day of week, 0 = Monday .. 6 = Sunday.
    pub weekday: u8,
    pub workingday: bool,
    pub weathersit: WeatherSit,
    /// Normalized temperature in `[0, 1]`.
    pub temp: f64,
    /// Normalized humidity in `[0, 1]`.
    pub hum: f64,
    /// Normalized windspeed in `[0, 1]`.
    pub windspeed: f64,
    /// Hour of day, 0..=23. Present iff the observation is hourly.
    pub hr: Option<u8>,
}

impl RawObservation {
    /// Check every field against its domain and the granularity invariant.
    ///
    /// An hourly observation must carry `hr`; a daily one must not. Either
    /// disagreement is an error rather than a silent column omission.
    pub fn validate(&self, granularity: Granularity) -> Result<(), ObservationError> {
        match (granularity, self.hr) {
            (Granularity::Hourly, None) => return Err(ObservationError::MissingHour),
            (Granularity::Daily, Some(_)) => return Err(ObservationError::UnexpectedHour),
            _ => {}
        }

        check_range("yr", self.yr as f64, 0.0, 1.0)?;
        check_range("mnth", self.mnth as f64, 1.0, 12.0)?;
        check_range("weekday", self.weekday as f64, 0.0, 6.0)?;
        if let Some(hr) = self.hr {
            check_range("hr", hr as f64, 0.0, 23.0)?;
        }
        check_range("temp", self.temp, 0.0, 1.0)?;
        check_range("hum", self.hum, 0.0, 1.0)?;
        check_range("windspeed", self.windspeed, 0.0, 1.0)?;

        Ok(())
    }

    /// Absolute calendar year.
    #[inline]
    pub fn year(&self) -> u16 {
        BASE_YEAR + self.yr as u16
    }

    /// Saturday or Sunday.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        self.weekday >= 5
    }
}

fn check_range(field: &'static str, value: f64, lo: f64, hi: f64) -> Result<(), ObservationError> {
    if value.is_nan() || value < lo || value > hi {
        return Err(ObservationError::OutOfRange {
            field,
            value,
            lo,
            hi,
        });
    }
    Ok(())
}

/// Rejected form input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationError {
    #[error("{field} = {value} is outside {lo}..={hi}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        lo: f64,
        hi: f64,
    },
    #[error("hourly granularity requires an hour of day")]
    MissingHour,
    #[error("daily granularity does not take an hour of day")]
    UnexpectedHour,
}
