//! High-level model wrapper for demand prediction.
//!
//! A [`DemandModel`] bundles the tree ensemble, the trained column schema,
//! and the objective's output transform. It is loaded once per process
//! (see [`crate::artifact`] and [`crate::engine`]) and is read-only
//! afterwards.

use tracing::trace;

use crate::features::FeatureFrame;
use crate::forest::Forest;
use crate::schema::FeatureSchema;

// =============================================================================
// DemandModel
// =============================================================================

/// A trained gradient-boosted regression model, inference-ready.
#[derive(Debug, Clone)]
pub struct DemandModel {
    forest: Forest,
    objective: Objective,
    /// Trained column set, when the artifact recorded feature names.
    schema: Option<FeatureSchema>,
    num_features: usize,
}

impl DemandModel {
    /// Assemble a model from its parts.
    pub fn new(
        forest: Forest,
        objective: Objective,
        schema: Option<FeatureSchema>,
        num_features: usize,
    ) -> Self {
        Self {
            forest,
            objective,
            schema,
            num_features,
        }
    }

    /// Number of features the model was trained on.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Number of trees in the ensemble.
    #[inline]
    pub fn num_trees(&self) -> usize {
        self.forest.num_trees()
    }

    /// The trained column schema, if the artifact carried one.
    pub fn schema(&self) -> Option<&FeatureSchema> {
        self.schema.as_ref()
    }

    /// The objective's output transform.
    #[inline]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Predict the ride count for one engineered frame.
    ///
    /// When the model carries a schema, the frame is reindexed to it first
    /// (zero-filling absent columns, dropping extras); otherwise the
    /// frame's own column order is consumed positionally. Values are
    /// narrowed to `f32` at this boundary, matching how the model was
    /// trained.
    pub fn predict(&self, frame: &FeatureFrame) -> f64 {
        let values = match &self.schema {
            Some(schema) => schema.align(frame).values_f32(),
            None => frame.values_f32(),
        };
        let margin = self.forest.predict_row(&values);
        let prediction = self.objective.transform(margin);
        trace!(
            margin = margin as f64,
            prediction = prediction as f64,
            "evaluated ensemble"
        );
        prediction as f64
    }
}

// =============================================================================
// Objective
// =============================================================================

/// Output transform of the training objective.
///
/// Only the regression family is representable; classification and ranking
/// artifacts are rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Objective {
    /// Squared error loss (no transformation).
    SquaredError,
    /// Absolute error loss (no transformation).
    AbsoluteError,
    /// Poisson count regression (exp transform).
    Poisson,
    /// Gamma regression (exp transform).
    Gamma,
    /// Tweedie regression (exp transform).
    Tweedie { variance_power: f32 },
}

impl Default for Objective {
    fn default() -> Self {
        Objective::SquaredError
    }
}

impl Objective {
    /// Apply the objective transformation to a margin prediction.
    pub fn transform(&self, margin: f32) -> f32 {
        match self {
            Objective::SquaredError | Objective::AbsoluteError => margin,
            Objective::Poisson | Objective::Gamma | Objective::Tweedie { .. } => margin.exp(),
        }
    }

    /// Whether predictions come out of an exp link (strictly positive).
    pub fn is_log_link(&self) -> bool {
        matches!(
            self,
            Objective::Poisson | Objective::Gamma | Objective::Tweedie { .. }
        )
    }
}
