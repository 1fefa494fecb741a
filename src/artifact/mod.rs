//! Model artifact loading.
//!
//! The model is consumed as a single XGBoost JSON file, read once at
//! process start. A missing, unparsable, or unsupported artifact is a
//! terminal error: there is no retry and no fallback prediction path.
//!
//! Only the tree booster with a regression objective is accepted; the
//! demand model is a tuned `gbtree` regressor, and anything else indicates
//! the wrong artifact was supplied.

mod convert;
pub mod format;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::model::DemandModel;

/// Why an artifact could not be turned into a usable model.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported booster `{0}`: demand prediction needs a gbtree ensemble")]
    UnsupportedBooster(&'static str),
    #[error("unsupported objective `{0}`: expected a regression objective")]
    UnsupportedObjective(String),
    #[error("tree {0} has no nodes")]
    EmptyTree(usize),
    #[error("tree {tree} declares {declared} nodes but stores {stored}")]
    TruncatedTree {
        tree: usize,
        declared: usize,
        stored: usize,
    },
    #[error(
        "invalid node index in tree {tree}: node {node} references child {child} \
         but tree has {num_nodes} nodes"
    )]
    InvalidNodeIndex {
        tree: usize,
        node: usize,
        child: i32,
        num_nodes: usize,
    },
}

/// Load a demand model from an XGBoost JSON artifact on disk.
pub fn load(path: &Path) -> Result<DemandModel, ArtifactError> {
    let file = File::open(path)?;
    let parsed: format::ArtifactFile = serde_json::from_reader(BufReader::new(file))?;
    let model = parsed.into_model()?;
    info!(
        path = %path.display(),
        trees = model.num_trees(),
        features = model.num_features(),
        "loaded demand model"
    );
    Ok(model)
}

/// Parse a demand model from in-memory JSON.
pub fn from_json_str(json: &str) -> Result<DemandModel, ArtifactError> {
    let parsed: format::ArtifactFile = serde_json::from_str(json)?;
    parsed.into_model()
}
