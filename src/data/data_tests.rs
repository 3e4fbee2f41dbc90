//! Tests for the DataFrame container.

use super::*;

fn sample_df() -> DataFrame {
    DataFrame::new(vec![
        ("a".to_string(), Vector::from_slice(&[1.0, 2.0])),
        ("b".to_string(), Vector::from_slice(&[3.0, 4.0])),
    ])
    .expect("valid columns")
}

#[test]
fn test_new_and_shape() {
    let df = sample_df();
    assert_eq!(df.shape(), (2, 2));
    assert_eq!(df.n_rows(), 2);
    assert_eq!(df.column_names(), vec!["a", "b"]);
}

#[test]
fn test_new_rejects_ragged_columns() {
    let result = DataFrame::new(vec![
        ("a".to_string(), Vector::from_slice(&[1.0, 2.0])),
        ("b".to_string(), Vector::from_slice(&[3.0])),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_new_rejects_duplicate_names() {
    let result = DataFrame::new(vec![
        ("a".to_string(), Vector::from_slice(&[1.0])),
        ("a".to_string(), Vector::from_slice(&[2.0])),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_new_rejects_empty() {
    assert!(DataFrame::new(vec![]).is_err());
}

#[test]
fn test_column_lookup() {
    let df = sample_df();
    assert_eq!(df.column("b").expect("exists").as_slice(), &[3.0, 4.0]);
    assert!(df.column("missing").is_err());
}

#[test]
fn test_select_preserves_requested_order() {
    let df = sample_df();
    let selected = df.select(&["b", "a"]).expect("both exist");
    assert_eq!(selected.column_names(), vec!["b", "a"]);

    let m = selected.to_matrix();
    assert_eq!(m.get(0, 0), 3.0);
    assert_eq!(m.get(0, 1), 1.0);
}

#[test]
fn test_add_column() {
    let mut df = sample_df();
    df.add_column("c".to_string(), Vector::from_slice(&[5.0, 6.0]))
        .expect("length matches");
    assert_eq!(df.shape(), (2, 3));

    assert!(df
        .add_column("c".to_string(), Vector::from_slice(&[7.0, 8.0]))
        .is_err());
    assert!(df
        .add_column("d".to_string(), Vector::from_slice(&[7.0]))
        .is_err());
}

#[test]
fn test_to_matrix_row_major() {
    let df = sample_df();
    let m = df.to_matrix();
    assert_eq!(m.shape(), (2, 2));
    assert_eq!(m.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
}
