//! Core traits for ML estimators.
//!
//! These traits define the API contract for the regression models used by
//! the training and inference pipelines.

use crate::error::Result;
use crate::primitives::{Matrix, Vector};

/// Primary trait for supervised learning estimators.
///
/// Estimators implement fit/predict/score following sklearn conventions.
///
/// # Examples
///
/// ```
/// use sondeo::prelude::*;
///
/// let x = Matrix::from_vec(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let y = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
///
/// let mut model = DecisionTreeRegressor::new().with_max_depth(3);
/// model.fit(&x, &y).unwrap();
/// let predictions = model.predict(&x);
/// assert_eq!(predictions.len(), 4);
/// ```
pub trait Estimator {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, empty data).
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()>;

    /// Predicts target values for input data.
    fn predict(&self, x: &Matrix<f32>) -> Vector<f32>;

    /// Computes the R² score on the given data.
    fn score(&self, x: &Matrix<f32>, y: &Vector<f32>) -> f32 {
        let predictions = self.predict(x);
        crate::metrics::r_squared(&predictions, y)
    }
}
