//! Shared helpers for the integration suite.

#![allow(dead_code)]

use std::path::PathBuf;

use ridewise::artifact;
use ridewise::model::DemandModel;
use ridewise::observation::{RawObservation, Season, WeatherSit};

/// Directory holding the fixture artifacts.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Path to the fixture demand model.
pub fn demand_model_path() -> PathBuf {
    fixtures_dir().join("demand_model.json")
}

/// Load the fixture demand model.
///
/// Three stumps over a 20-column schema, base score 10:
/// - temp < 0.5: +100, else +300
/// - workingday < 0.5: +40, else +140
/// - hour_cos < 0.0: +50, else +0
pub fn load_demand_model() -> DemandModel {
    artifact::load(&demand_model_path()).expect("fixture model loads")
}

/// The reference observation: a working Monday noon in June 2011 with
/// mild weather.
pub fn reference_observation() -> RawObservation {
    RawObservation {
        season: Season::Winter,
        yr: 0,
        mnth: 6,
        holiday: false,
        weekday: 0,
        workingday: true,
        weathersit: WeatherSit::Clear,
        temp: 0.5,
        hum: 0.6,
        windspeed: 0.3,
        hr: Some(12),
    }
}
