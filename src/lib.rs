//! Sondeo: survey severity modeling in pure Rust.
//!
//! Sondeo ingests a tabular survey dataset, derives a small ordinal and
//! categorical feature encoding, fits a random-forest severity regressor,
//! and persists a self-contained inference bundle. A consumer loads that
//! bundle and runs single-row inference from categorical selections,
//! reproducing the training-time encoding exactly.
//!
//! # Quick Start
//!
//! ```
//! use sondeo::prelude::*;
//!
//! # fn records() -> Vec<sondeo::dataset::SurveyRecord> {
//! #     let mk = |g: &str, p: &str| sondeo::dataset::SurveyRecord {
//! #         age_group: "18–24".into(),
//! #         education_level: "Undergraduate".into(),
//! #         employment_status: "Employed".into(),
//! #         gender: g.into(),
//! #         skill_alignment: "Yes".into(),
//! #         skill_training: "No".into(),
//! #         job_seeking_status: "Actively".into(),
//! #         issue_severity_perception: p.into(),
//! #         proposed_solution: "x".into(),
//! #     };
//! #     vec![mk("Male", "Yes"), mk("Female", "No"), mk("Male", "Maybe")]
//! # }
//! // Train over cleaned survey records and keep the bundle.
//! let trained = pipeline::train(records()).unwrap();
//!
//! // Inference replays the same encoding path.
//! let selections = pipeline::Selections {
//!     age_group: "18–24".into(),
//!     education_level: "Undergraduate".into(),
//!     employment_status: "Employed".into(),
//!     gender: "Male".into(),
//!     skill_alignment: "Yes".into(),
//!     skill_training: "No".into(),
//!     job_seeking_status: "Actively".into(),
//! };
//! let score = pipeline::predict(&trained.bundle, &selections).unwrap();
//! assert!((1.0..=5.0).contains(&score));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: DataFrame for named feature columns
//! - [`dataset`]: Survey CSV ingestion and cleaning
//! - [`features`]: Static ordinal maps and the severity target
//! - [`preprocessing`]: Label encoders for free-form categorical fields
//! - [`tree`]: CART regression trees and the random forest
//! - [`metrics`]: Regression evaluation metrics
//! - [`pipeline`]: Training and inference orchestration
//! - [`bundle`]: The persisted model + encoder snapshot

pub mod bundle;
pub mod data;
pub mod dataset;
pub mod error;
pub mod features;
pub mod metrics;
pub mod pipeline;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod traits;
pub mod tree;

pub use error::{Result, SondeoError};
pub use primitives::{Matrix, Vector};
pub use traits::Estimator;
