//! Tests for bundle persistence.

use super::*;
use crate::preprocessing::LabelEncoder;
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;

fn fitted_bundle() -> ModelBundle {
    let x = Matrix::from_vec(4, 2, vec![1.0, 0.0, 2.0, 1.0, 1.0, 1.0, 2.0, 0.0]).expect("valid");
    let y = Vector::from_slice(&[1.0, 5.0, 3.0, 3.0]);
    let mut model = RandomForestRegressor::new(5).with_random_state(42);
    model.fit(&x, &y).expect("fit should succeed");

    ModelBundle {
        model,
        encoders: EncoderSet {
            gender: LabelEncoder::fit("gender", ["Male", "Female"]),
            skill_alignment: LabelEncoder::fit("skill_alignment", ["Yes", "No"]),
            skill_training: LabelEncoder::fit("skill_training", ["Yes", "No"]),
            job_seeking_status: LabelEncoder::fit("job_seeking_status", ["Actively", "Not"]),
        },
        maps: OrdinalMaps::standard(),
        feature_names: vec!["a".to_string(), "b".to_string()],
    }
}

#[test]
fn test_save_load_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("model.bin");

    let bundle = fitted_bundle();
    bundle.save(&path).expect("save should succeed");

    let loaded = ModelBundle::load(&path).expect("load should succeed");

    // Encoder tables, maps, and field order survive bit-identically.
    assert_eq!(bundle.encoders, loaded.encoders);
    assert_eq!(bundle.maps, loaded.maps);
    assert_eq!(bundle.feature_names, loaded.feature_names);

    // The model behaves identically.
    let probe = Matrix::from_vec(1, 2, vec![1.5, 0.5]).expect("valid");
    assert_eq!(
        bundle.model.predict(&probe).as_slice(),
        loaded.model.predict(&probe).as_slice()
    );
}

#[test]
fn test_save_overwrites_previous_bundle() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("model.bin");

    let mut bundle = fitted_bundle();
    bundle.save(&path).expect("first save");

    bundle.feature_names = vec!["c".to_string()];
    bundle.save(&path).expect("second save");

    let loaded = ModelBundle::load(&path).expect("load");
    assert_eq!(loaded.feature_names, vec!["c".to_string()]);
}

#[test]
fn test_load_missing_is_assets_unavailable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = ModelBundle::load(dir.path().join("absent.bin")).expect_err("missing");
    assert!(err.is_assets_unavailable());
}

#[test]
fn test_load_corrupt_is_assets_unavailable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("model.bin");
    std::fs::write(&path, b"not a bundle").expect("write");

    let err = ModelBundle::load(&path).expect_err("corrupt");
    assert!(err.is_assets_unavailable());
}

#[test]
fn test_try_load_soft_sentinel() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("model.bin");

    assert!(ModelBundle::try_load(&path).is_none());

    fitted_bundle().save(&path).expect("save");
    assert!(ModelBundle::try_load(&path).is_some());
}

#[test]
fn test_selection_options() {
    let bundle = fitted_bundle();
    let options = bundle.selection_options();
    assert_eq!(options.len(), 7);

    assert_eq!(options[0].0, "age_group");
    assert_eq!(options[0].1, vec!["18–24", "25–34"]);

    let (field, labels) = &options[3];
    assert_eq!(field, "gender");
    assert_eq!(labels, &["Female".to_string(), "Male".to_string()]);
}
