//! On-disk schema of the XGBoost JSON model format.
//!
//! Only the subset a tuned demand regressor actually serializes is
//! declared here; unknown fields are ignored by serde. XGBoost stores most
//! numeric parameters as strings (`"num_nodes": "7"`), handled with
//! `DisplayFromStr`, and `base_score` polymorphically (number, string,
//! array, or bracketed string), handled with a custom deserializer.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};

// --- Custom deserializers for XGBoost-specific encodings ---------------------

/// Deserialize `base_score`, which appears as:
/// - a number: `1.5`
/// - a stringified number: `"1.5"`
/// - an array: `[1.5]`
/// - a bracketed string: `"[1.5E0]"`
fn deserialize_base_score<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as SerdeError;

    let mut cur = Value::deserialize(deserializer)?;
    loop {
        match cur {
            Value::Number(n) => {
                return n
                    .as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| SerdeError::custom("base_score is not a finite number"));
            }
            Value::String(s) => {
                if let Ok(f) = s.trim().parse::<f32>() {
                    return Ok(f);
                }
                let t = s.trim();
                if let Some(inner) = t.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
                    if let Ok(f) = inner.parse::<f32>() {
                        return Ok(f);
                    }
                }
                return Err(SerdeError::custom(format!(
                    "cannot parse base_score from string: {s}"
                )));
            }
            Value::Array(arr) => {
                cur = arr
                    .into_iter()
                    .next()
                    .ok_or_else(|| SerdeError::custom("base_score array is empty"))?;
            }
            _ => {
                return Err(SerdeError::custom(
                    "base_score must be a number, string, or array",
                ));
            }
        }
    }
}

// --- Tree-level definitions --------------------------------------------------

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct TreeParam {
    #[serde_as(as = "DisplayFromStr")]
    pub num_nodes: i64,
}

/// One tree, as parallel per-node arrays.
///
/// Nodes are stored breadth-first; a node with `left_children == -1` is a
/// leaf, and its value lives in `base_weights`.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeJson {
    pub tree_param: TreeParam,
    pub base_weights: Vec<f32>,
    pub left_children: Vec<i32>,
    pub right_children: Vec<i32>,
    pub split_indices: Vec<i32>,
    pub split_conditions: Vec<f32>,
    pub default_left: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GbTreeModel {
    pub trees: Vec<TreeJson>,
}

/// Gradient booster variants. Only `gbtree` converts; the others are
/// recognized so the rejection can name them.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum GradientBooster {
    Gbtree { model: GbTreeModel },
    Gblinear {},
    Dart {},
}

impl GradientBooster {
    pub fn name(&self) -> &'static str {
        match self {
            GradientBooster::Gbtree { .. } => "gbtree",
            GradientBooster::Gblinear {} => "gblinear",
            GradientBooster::Dart {} => "dart",
        }
    }
}

// --- Learner-level definitions -----------------------------------------------

/// Training objective, kept as the raw name plus the one parameter block
/// the regression family can carry. Matching against the supported names
/// happens at conversion, where an unknown name becomes a typed error.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectiveSpec {
    pub name: String,
    #[serde(default)]
    pub tweedie_regression_param: Option<TweedieRegressionParam>,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct TweedieRegressionParam {
    #[serde_as(as = "DisplayFromStr")]
    pub tweedie_variance_power: f32,
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct LearnerModelParam {
    #[serde(deserialize_with = "deserialize_base_score")]
    pub base_score: f32,
    #[serde_as(as = "DisplayFromStr")]
    pub num_feature: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Learner {
    /// Trained column names; absent in models fit without names.
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub gradient_booster: GradientBooster,
    pub objective: ObjectiveSpec,
    pub learner_model_param: LearnerModelParam,
}

// --- Top-level artifact ------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactFile {
    pub version: [u32; 3],
    pub learner: Learner,
}
