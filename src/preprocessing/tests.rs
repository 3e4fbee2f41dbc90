//! Tests for the label encoder.

use super::*;
use proptest::prelude::*;

#[test]
fn test_fit_sorted_dense_codes() {
    let encoder = LabelEncoder::fit("gender", ["Male", "Female", "Other", "Male"]);
    assert_eq!(encoder.classes(), ["Female", "Male", "Other"]);
    assert_eq!(encoder.len(), 3);
    assert_eq!(encoder.encode("Female").expect("fitted"), 0);
    assert_eq!(encoder.encode("Male").expect("fitted"), 1);
    assert_eq!(encoder.encode("Other").expect("fitted"), 2);
}

#[test]
fn test_fit_trims_whitespace() {
    let encoder = LabelEncoder::fit("gender", ["  Male ", "Male", " Female"]);
    assert_eq!(encoder.classes(), ["Female", "Male"]);
    assert_eq!(encoder.encode(" Male  ").expect("trimmed"), 1);
}

#[test]
fn test_encode_unknown_is_typed_error() {
    let encoder = LabelEncoder::fit("gender", ["Male", "Female"]);
    let err = encoder.encode("never-seen-label").expect_err("unknown");
    match err {
        SondeoError::UnknownCategory { field, label } => {
            assert_eq!(field, "gender");
            assert_eq!(label, "never-seen-label");
        }
        other => panic!("expected UnknownCategory, got {other:?}"),
    }
}

#[test]
fn test_decode_inverse_of_encode() {
    let encoder = LabelEncoder::fit("skill_alignment", ["Yes", "No", "Partially"]);
    for class in encoder.classes() {
        let code = encoder.encode(class).expect("fitted");
        assert_eq!(encoder.decode(code).expect("in range"), class);
    }
}

#[test]
fn test_decode_out_of_range() {
    let encoder = LabelEncoder::fit("gender", ["Male"]);
    assert!(matches!(
        encoder.decode(5),
        Err(SondeoError::UnknownCode { code: 5, .. })
    ));
    assert!(encoder.decode(-1).is_err());
}

#[test]
fn test_fit_idempotent() {
    let values = ["No", "Yes", "Maybe", "Yes", "No"];
    let a = LabelEncoder::fit("skill_training", values);
    let b = LabelEncoder::fit("skill_training", values);
    assert_eq!(a, b);
}

#[test]
fn test_empty_fit() {
    let encoder = LabelEncoder::fit("gender", Vec::<String>::new());
    assert!(encoder.is_empty());
    assert!(encoder.encode("anything").is_err());
}

#[test]
fn test_transform_column() {
    let encoder = LabelEncoder::fit("job_seeking_status", ["Actively", "Not seeking"]);
    let codes = encoder
        .transform(["Not seeking", "Actively", "Actively"])
        .expect("all fitted");
    assert_eq!(codes, vec![1, 0, 0]);
    assert!(encoder.transform(["Passively"]).is_err());
}

#[test]
fn test_encoder_set_iterates_in_feature_order() {
    let set = EncoderSet {
        gender: LabelEncoder::fit("gender", ["Male", "Female"]),
        skill_alignment: LabelEncoder::fit("skill_alignment", ["Yes", "No"]),
        skill_training: LabelEncoder::fit("skill_training", ["Yes", "No"]),
        job_seeking_status: LabelEncoder::fit("job_seeking_status", ["Yes", "No"]),
    };

    let fields: Vec<&str> = set.iter().map(|e| e.field()).collect();
    assert_eq!(
        fields,
        vec!["gender", "skill_alignment", "skill_training", "job_seeking_status"]
    );
}

#[test]
fn test_serde_round_trip() {
    let encoder = LabelEncoder::fit("gender", ["Male", "Female", "Prefer not to say"]);
    let bytes = bincode::serialize(&encoder).expect("serialize should succeed");
    let back: LabelEncoder = bincode::deserialize(&bytes).expect("deserialize should succeed");
    assert_eq!(encoder, back);
}

proptest! {
    #[test]
    fn prop_round_trip_over_fitted_set(
        labels in proptest::collection::vec("[A-Za-z][A-Za-z ]{0,10}", 1..30)
    ) {
        let encoder = LabelEncoder::fit("field", labels.iter());
        for class in encoder.classes() {
            let code = encoder.encode(class).expect("class came from the fitted set");
            prop_assert_eq!(encoder.decode(code).expect("code is in range"), class);
        }
    }

    #[test]
    fn prop_fit_is_order_insensitive(
        mut labels in proptest::collection::vec("[a-z]{1,6}", 1..20)
    ) {
        let a = LabelEncoder::fit("field", labels.iter());
        labels.reverse();
        let b = LabelEncoder::fit("field", labels.iter());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_codes_are_dense(
        labels in proptest::collection::vec("[A-Za-z]{1,8}", 1..25)
    ) {
        let encoder = LabelEncoder::fit("field", labels.iter());
        let mut codes: Vec<i32> = encoder
            .classes()
            .iter()
            .map(|c| encoder.encode(c).expect("fitted"))
            .collect();
        codes.sort_unstable();
        let expected: Vec<i32> = (0..encoder.len() as i32).collect();
        prop_assert_eq!(codes, expected);
    }
}
