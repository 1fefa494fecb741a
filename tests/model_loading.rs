//! Loading the fixture artifact from disk.

mod common;

use ridewise::artifact::{self, ArtifactError};
use ridewise::model::Objective;

#[test]
fn fixture_artifact_loads_with_metadata() {
    let model = common::load_demand_model();

    assert_eq!(model.num_trees(), 3);
    assert_eq!(model.num_features(), 20);
    assert_eq!(model.objective(), Objective::SquaredError);

    let schema = model.schema().expect("fixture carries feature names");
    assert_eq!(schema.len(), 20);
    assert_eq!(schema.names()[0], "season");
    assert_eq!(schema.names()[19], "is_weekend");
}

#[test]
fn missing_artifact_is_a_terminal_io_error() {
    let missing = common::fixtures_dir().join("no_such_model.json");
    match artifact::load(&missing) {
        Err(ArtifactError::Io(_)) => {}
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn corrupt_artifact_is_a_terminal_parse_error() {
    let corrupt = common::fixtures_dir().join("corrupt_model.json");
    match artifact::load(&corrupt) {
        Err(ArtifactError::Malformed(_)) => {}
        other => panic!("expected Malformed error, got {other:?}"),
    }
}
