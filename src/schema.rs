//! Column alignment against the model's trained schema.
//!
//! Gradient-boosted models are schema-sensitive: training and inference
//! must present identical column sets in identical order. [`FeatureSchema`]
//! is the trained column list (the artifact's `feature_names`), and
//! [`FeatureSchema::align`] reconciles an engineered frame with it by
//! zero-filling absent columns and dropping extras.

use crate::features::FeatureFrame;

/// The exact column set and order a model was trained on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from an ordered column list.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Column names in trained order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Reindex a frame to this schema.
    ///
    /// Every schema column appears in the output, in schema order: with the
    /// frame's value if present, zero-filled otherwise. Frame columns the
    /// schema does not name are dropped. Idempotent: aligning an
    /// already-aligned frame is a no-op.
    pub fn align(&self, frame: &FeatureFrame) -> FeatureFrame {
        let mut aligned = FeatureFrame::with_capacity(self.names.len());
        for name in &self.names {
            aligned.push(name.clone(), frame.get(name).unwrap_or(0.0));
        }
        aligned
    }
}

impl FromIterator<String> for FeatureSchema {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
