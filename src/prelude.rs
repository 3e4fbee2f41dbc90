//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sondeo::prelude::*;
//! ```

pub use crate::bundle::ModelBundle;
pub use crate::error::{Result, SondeoError};
pub use crate::metrics::{mae, mse, r_squared, rmse};
pub use crate::pipeline::{self, Selections};
pub use crate::preprocessing::{EncoderSet, LabelEncoder};
pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::Estimator;
pub use crate::tree::{DecisionTreeRegressor, RandomForestRegressor};
