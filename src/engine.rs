//! End-to-end forecasting and the process-wide model handle.
//!
//! The model is loaded once per process and reused across requests: the
//! artifact is read-only for the process's life, initialization is
//! explicit and idempotent, and there is no teardown. [`forecast`] is the
//! single request path: validate, engineer features, optionally enrich
//! with calendar columns, predict, classify.

use std::path::Path;
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::artifact::{self, ArtifactError};
use crate::demand::DemandForecast;
use crate::features;
use crate::model::DemandModel;
use crate::observation::{Granularity, ObservationError, RawObservation};

static MODEL: OnceLock<DemandModel> = OnceLock::new();

/// Initialize the process-wide model handle from an artifact on disk.
///
/// Idempotent: once a model is installed, later calls return the same
/// handle without touching the filesystem, regardless of the path they
/// pass. A failed load installs nothing, so the call can be retried with
/// a corrected path.
pub fn init_global(path: &Path) -> Result<&'static DemandModel, ArtifactError> {
    if let Some(model) = MODEL.get() {
        return Ok(model);
    }
    let model = artifact::load(path)?;
    let handle = MODEL.get_or_init(|| model);
    info!(path = %path.display(), "demand model installed for this process");
    Ok(handle)
}

/// The process-wide model handle, if [`init_global`] has succeeded.
pub fn global() -> Option<&'static DemandModel> {
    MODEL.get()
}

/// Run one prediction request against a model.
///
/// `day_of_month` switches on the calendar enrichment columns (`year`,
/// `month`, `day`, `dayofweek`, `is_weekend`); pass `None` for models
/// trained without them. Either way the engineered frame is aligned to the
/// model's schema before evaluation, so unexpected columns cost nothing.
pub fn forecast(
    model: &DemandModel,
    raw: &RawObservation,
    granularity: Granularity,
    day_of_month: Option<u8>,
) -> Result<DemandForecast, ObservationError> {
    let mut frame = features::transform(raw, granularity)?;
    if let Some(day) = day_of_month {
        features::append_calendar(&mut frame, raw, day);
    }

    let prediction = model.predict(&frame);
    debug!(
        columns = frame.len(),
        prediction,
        "forecast request evaluated"
    );
    Ok(DemandForecast::from_prediction(prediction))
}
