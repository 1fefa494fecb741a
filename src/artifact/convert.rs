//! Conversion from the on-disk format to the native model.

use tracing::debug;

use super::format::{ArtifactFile, GradientBooster, Learner, ObjectiveSpec, TreeJson};
use super::ArtifactError;
use crate::forest::Forest;
use crate::model::{DemandModel, Objective};
use crate::schema::FeatureSchema;
use crate::trees::{DecisionTree, TreeBuilder};

impl ArtifactFile {
    /// Convert the parsed artifact into an inference-ready model.
    pub(crate) fn into_model(self) -> Result<DemandModel, ArtifactError> {
        let ArtifactFile { version, learner } = self;
        let Learner {
            feature_names,
            gradient_booster,
            objective,
            learner_model_param,
        } = learner;

        let objective = convert_objective(&objective)?;

        let model = match gradient_booster {
            GradientBooster::Gbtree { model } => model,
            other => return Err(ArtifactError::UnsupportedBooster(other.name())),
        };

        let base_score = margin_base_score(learner_model_param.base_score, objective);
        let mut forest = Forest::new().with_base_score(base_score);
        for (tree_idx, tree) in model.trees.iter().enumerate() {
            forest.push_tree(convert_tree(tree, tree_idx)?);
        }

        let schema = if feature_names.is_empty() {
            None
        } else {
            Some(FeatureSchema::new(feature_names))
        };

        debug!(
            ?version,
            trees = forest.num_trees(),
            named_columns = schema.as_ref().map_or(0, FeatureSchema::len),
            "converted model artifact"
        );

        Ok(DemandModel::new(
            forest,
            objective,
            schema,
            learner_model_param.num_feature as usize,
        ))
    }
}

/// Map the objective name to its output transform.
fn convert_objective(spec: &ObjectiveSpec) -> Result<Objective, ArtifactError> {
    match spec.name.as_str() {
        "reg:squarederror" | "reg:linear" => Ok(Objective::SquaredError),
        "reg:absoluteerror" => Ok(Objective::AbsoluteError),
        "count:poisson" => Ok(Objective::Poisson),
        "reg:gamma" => Ok(Objective::Gamma),
        "reg:tweedie" => Ok(Objective::Tweedie {
            variance_power: spec
                .tweedie_regression_param
                .as_ref()
                .map(|p| p.tweedie_variance_power)
                .unwrap_or(1.5),
        }),
        other => Err(ArtifactError::UnsupportedObjective(other.to_string())),
    }
}

/// Convert `base_score` to margin space.
///
/// XGBoost serializes `base_score` in the original output space; log-link
/// objectives need it in margin (log) space for the additive traversal.
fn margin_base_score(base_score: f32, objective: Objective) -> f32 {
    if objective.is_log_link() {
        base_score.max(1e-7).ln()
    } else {
        base_score
    }
}

/// Convert one tree's parallel arrays into native storage.
///
/// Nodes keep their stored order. A node with `left_children == -1` is a
/// leaf whose value is in `base_weights`; split nodes must reference
/// children inside the tree.
fn convert_tree(tree: &TreeJson, tree_idx: usize) -> Result<DecisionTree, ArtifactError> {
    let num_nodes = tree.tree_param.num_nodes as usize;
    if num_nodes == 0 {
        return Err(ArtifactError::EmptyTree(tree_idx));
    }

    let stored = [
        tree.base_weights.len(),
        tree.left_children.len(),
        tree.right_children.len(),
        tree.split_indices.len(),
        tree.split_conditions.len(),
        tree.default_left.len(),
    ]
    .into_iter()
    .min()
    .unwrap_or(0);
    if stored < num_nodes {
        return Err(ArtifactError::TruncatedTree {
            tree: tree_idx,
            declared: num_nodes,
            stored,
        });
    }

    let mut builder = TreeBuilder::new();
    for node_idx in 0..num_nodes {
        let left_child = tree.left_children[node_idx];
        let right_child = tree.right_children[node_idx];

        if left_child == -1 {
            builder.add_leaf(tree.base_weights[node_idx]);
            continue;
        }

        for child in [left_child, right_child] {
            if child < 0 || child as usize >= num_nodes {
                return Err(ArtifactError::InvalidNodeIndex {
                    tree: tree_idx,
                    node: node_idx,
                    child,
                    num_nodes,
                });
            }
        }

        builder.add_split(
            tree.split_indices[node_idx] as u32,
            tree.split_conditions[node_idx],
            tree.default_left[node_idx] != 0,
            left_child as u32,
            right_child as u32,
        );
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::artifact;
    use crate::features::FeatureFrame;

    fn artifact_json(booster: serde_json::Value, objective_name: &str) -> String {
        json!({
            "version": [2, 1, 0],
            "learner": {
                "feature_names": ["temp", "hum"],
                "gradient_booster": booster,
                "objective": {"name": objective_name},
                "learner_model_param": {"base_score": "0.5", "num_feature": "2"},
            },
        })
        .to_string()
    }

    fn stump_tree(feature: i32, threshold: f32, left: f32, right: f32) -> serde_json::Value {
        json!({
            "tree_param": {"num_nodes": "3"},
            "base_weights": [0.0, left, right],
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [feature, 0, 0],
            "split_conditions": [threshold, 0.0, 0.0],
            "default_left": [1, 0, 0],
        })
    }

    fn gbtree(trees: Vec<serde_json::Value>) -> serde_json::Value {
        json!({"name": "gbtree", "model": {"trees": trees}})
    }

    #[test]
    fn converts_a_regression_ensemble() {
        let json = artifact_json(
            gbtree(vec![stump_tree(0, 0.5, 1.0, 2.0), stump_tree(1, 0.5, 10.0, 20.0)]),
            "reg:squarederror",
        );
        let model = artifact::from_json_str(&json).unwrap();

        assert_eq!(model.num_trees(), 2);
        assert_eq!(model.num_features(), 2);
        assert_eq!(model.objective(), Objective::SquaredError);
        assert_eq!(
            model.schema().unwrap().names(),
            &["temp".to_string(), "hum".to_string()]
        );

        let mut frame = FeatureFrame::new();
        frame.push("temp", 0.3);
        frame.push("hum", 0.7);
        // 0.5 base + 1.0 (temp goes left) + 20.0 (hum goes right)
        assert_eq!(model.predict(&frame), 21.5);
    }

    #[test]
    fn rejects_gblinear() {
        let json = artifact_json(
            json!({"name": "gblinear", "model": {"weights": [0.1]}}),
            "reg:squarederror",
        );
        assert!(matches!(
            artifact::from_json_str(&json),
            Err(ArtifactError::UnsupportedBooster("gblinear"))
        ));
    }

    #[test]
    fn rejects_dart() {
        let json = artifact_json(
            json!({"name": "dart", "gbtree": {}, "weight_drop": []}),
            "reg:squarederror",
        );
        assert!(matches!(
            artifact::from_json_str(&json),
            Err(ArtifactError::UnsupportedBooster("dart"))
        ));
    }

    #[test]
    fn rejects_classification_objective() {
        let json = artifact_json(gbtree(vec![]), "binary:logistic");
        match artifact::from_json_str(&json) {
            Err(ArtifactError::UnsupportedObjective(name)) => {
                assert_eq!(name, "binary:logistic");
            }
            other => panic!("expected UnsupportedObjective, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_tree() {
        let empty = json!({
            "tree_param": {"num_nodes": "0"},
            "base_weights": [],
            "left_children": [],
            "right_children": [],
            "split_indices": [],
            "split_conditions": [],
            "default_left": [],
        });
        let json = artifact_json(gbtree(vec![empty]), "reg:squarederror");
        assert!(matches!(
            artifact::from_json_str(&json),
            Err(ArtifactError::EmptyTree(0))
        ));
    }

    #[test]
    fn rejects_truncated_arrays() {
        let truncated = json!({
            "tree_param": {"num_nodes": "3"},
            "base_weights": [0.0],
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [0, 0, 0],
            "split_conditions": [0.5, 0.0, 0.0],
            "default_left": [1, 0, 0],
        });
        let json = artifact_json(gbtree(vec![truncated]), "reg:squarederror");
        assert!(matches!(
            artifact::from_json_str(&json),
            Err(ArtifactError::TruncatedTree {
                tree: 0,
                declared: 3,
                stored: 1,
            })
        ));
    }

    #[test]
    fn rejects_out_of_range_child() {
        let bad = json!({
            "tree_param": {"num_nodes": "3"},
            "base_weights": [0.0, 1.0, 2.0],
            "left_children": [5, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [0, 0, 0],
            "split_conditions": [0.5, 0.0, 0.0],
            "default_left": [1, 0, 0],
        });
        let json = artifact_json(gbtree(vec![bad]), "reg:squarederror");
        assert!(matches!(
            artifact::from_json_str(&json),
            Err(ArtifactError::InvalidNodeIndex {
                tree: 0,
                node: 0,
                child: 5,
                ..
            })
        ));
    }

    #[test]
    fn log_link_base_score_moves_to_margin_space() {
        assert_eq!(margin_base_score(1.0, Objective::Poisson), 0.0);
        assert_eq!(margin_base_score(0.5, Objective::SquaredError), 0.5);
        // Non-positive base score clamps instead of producing -inf
        assert!(margin_base_score(0.0, Objective::Gamma).is_finite());
    }

    #[test]
    fn tweedie_variance_power_defaults() {
        let spec: ObjectiveSpec =
            serde_json::from_value(json!({"name": "reg:tweedie"})).unwrap();
        assert_eq!(
            convert_objective(&spec).unwrap(),
            Objective::Tweedie {
                variance_power: 1.5
            }
        );
    }

    #[test]
    fn missing_feature_names_means_no_schema() {
        let json = json!({
            "version": [2, 1, 0],
            "learner": {
                "gradient_booster": gbtree(vec![stump_tree(0, 0.5, 1.0, 2.0)]),
                "objective": {"name": "reg:squarederror"},
                "learner_model_param": {"base_score": "0.0", "num_feature": "1"},
            },
        })
        .to_string();
        let model = artifact::from_json_str(&json).unwrap();
        assert!(model.schema().is_none());
    }
}
