//! Feature engineering: cyclical encodings and interaction terms.
//!
//! [`transform`] is the one reproducible contract in the pipeline: a pure
//! function from a validated [`RawObservation`] to a [`FeatureFrame`] of
//! named columns. Periodic calendar values (hour, weekday, month) become
//! sine/cosine pairs so that adjacent periods stay numerically close
//! (hour 23 borders hour 0), and two multiplicative interaction terms
//! capture weather coupling.
//!
//! [`append_calendar`] is a separate enrichment step for the raw calendar
//! columns some trained models expect (`year`, `day`, `is_weekend`, ...);
//! keeping it out of [`transform`] keeps the transform's output set fixed
//! per granularity.

use std::f64::consts::TAU;

use crate::observation::{Granularity, ObservationError, RawObservation};

// =============================================================================
// FeatureFrame
// =============================================================================

/// A single row of named `f64` columns, in insertion order.
///
/// Frames are small (around twenty columns), built fresh per request, and
/// never mutated after derivation, so lookups are linear scans and values
/// are only narrowed to `f32` at the model boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureFrame {
    columns: Vec<(String, f64)>,
}

impl FeatureFrame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frame with room for `capacity` columns.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Append a column. Names are not deduplicated; the builders in this
    /// module never emit a duplicate.
    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.columns.push((name.into(), value));
    }

    /// Value of a column by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    /// Whether a column is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the frame has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Column names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Values in insertion order, narrowed to `f32` for the model boundary.
    pub fn values_f32(&self) -> Vec<f32> {
        self.columns.iter().map(|&(_, v)| v as f32).collect()
    }
}

// =============================================================================
// Transform
// =============================================================================

/// Sine/cosine coordinates of `value` on a cycle of length `period`.
#[inline]
fn cyclical(value: f64, period: f64) -> (f64, f64) {
    let angle = TAU * value / period;
    (angle.sin(), angle.cos())
}

#[inline]
fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Expand a raw observation into the engineered feature set.
///
/// The output contains every raw field (including `hr` for hourly
/// granularity) followed by the derived columns: the hour sine/cosine pair
/// (hourly only), the weekday and month pairs, and the two interaction
/// terms. Identical input and granularity yield bit-identical output.
///
/// Fails only on invalid input: a field outside its domain, or a
/// granularity that disagrees with the presence of `hr`.
pub fn transform(
    raw: &RawObservation,
    granularity: Granularity,
) -> Result<FeatureFrame, ObservationError> {
    raw.validate(granularity)?;

    let mut frame = FeatureFrame::with_capacity(19);
    frame.push("season", raw.season.code() as f64);
    frame.push("yr", raw.yr as f64);
    frame.push("mnth", raw.mnth as f64);
    frame.push("holiday", flag(raw.holiday));
    frame.push("weekday", raw.weekday as f64);
    frame.push("workingday", flag(raw.workingday));
    frame.push("weathersit", raw.weathersit.code() as f64);
    frame.push("temp", raw.temp);
    frame.push("hum", raw.hum);
    frame.push("windspeed", raw.windspeed);

    if let Some(hr) = raw.hr {
        frame.push("hr", hr as f64);
        let (sin, cos) = cyclical(hr as f64, 24.0);
        frame.push("hour_sin", sin);
        frame.push("hour_cos", cos);
    }

    let (sin, cos) = cyclical(raw.weekday as f64, 7.0);
    frame.push("dayofweek_sin", sin);
    frame.push("dayofweek_cos", cos);

    let (sin, cos) = cyclical(raw.mnth as f64, 12.0);
    frame.push("month_sin", sin);
    frame.push("month_cos", cos);

    frame.push("temp_hum_interaction", raw.temp * raw.hum);
    frame.push("windspeed_temp_interaction", raw.windspeed * raw.temp);

    Ok(frame)
}

/// Append the raw calendar columns derived from the observation and the
/// current day of month.
///
/// Models trained without these columns are unaffected: schema alignment
/// drops extras.
pub fn append_calendar(frame: &mut FeatureFrame, raw: &RawObservation, day_of_month: u8) {
    frame.push("year", raw.year() as f64);
    frame.push("month", raw.mnth as f64);
    frame.push("day", day_of_month as f64);
    frame.push("dayofweek", raw.weekday as f64);
    frame.push("is_weekend", flag(raw.is_weekend()));
}
