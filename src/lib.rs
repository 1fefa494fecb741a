//! ridewise: bike-sharing demand estimation on a pre-trained gradient-boosted model.
//!
//! This crate turns weather and calendar inputs into a ride-count estimate:
//! raw inputs are validated, expanded into an engineered feature set
//! (cyclical encodings and interaction terms), aligned to the column schema
//! the model was trained on, and evaluated against a gradient-boosted
//! regression ensemble loaded from an XGBoost JSON artifact.
//!
//! # Example
//!
//! ```ignore
//! use ridewise::{artifact, engine};
//! use ridewise::observation::{Granularity, RawObservation, Season, WeatherSit};
//!
//! let model = artifact::load("xgb_tuned_model.json".as_ref())?;
//! let raw = RawObservation {
//!     season: Season::Winter,
//!     yr: 0,
//!     mnth: 6,
//!     holiday: false,
//!     weekday: 0,
//!     workingday: true,
//!     weathersit: WeatherSit::Clear,
//!     temp: 0.5,
//!     hum: 0.6,
//!     windspeed: 0.3,
//!     hr: Some(12),
//! };
//! let forecast = engine::forecast(&model, &raw, Granularity::Hourly, None)?;
//! println!("{} rides, {}", forecast.rides(), forecast.level());
//! ```

pub mod artifact;
pub mod demand;
pub mod engine;
pub mod features;
pub mod forest;
pub mod model;
pub mod observation;
pub mod schema;
pub mod trees;
