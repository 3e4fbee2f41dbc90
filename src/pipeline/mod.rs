//! Training and inference pipelines.
//!
//! [`train`] turns cleaned survey records into a self-contained
//! [`ModelBundle`]; [`predict`] replays the exact same encoding path on a
//! single row of selections and queries the bundled model. The two sides
//! never re-derive encoding state independently: everything inference
//! needs is read from the bundle.

use crate::bundle::ModelBundle;
use crate::data::DataFrame;
use crate::dataset::{self, SurveyRecord};
use crate::error::Result;
use crate::features::{severity_score, OrdinalField, OrdinalMaps};
use crate::preprocessing::{EncoderSet, LabelEncoder};
use crate::primitives::Vector;
use crate::traits::Estimator;
use crate::tree::RandomForestRegressor;
use std::path::Path;

/// Feature column order the model is fitted on, recorded in the bundle and
/// replayed verbatim at inference time.
pub const FEATURE_NAMES: [&str; 7] = [
    "age_ordinal",
    "education_ordinal",
    "employment_ordinal",
    "gender",
    "skill_alignment",
    "skill_training",
    "job_seeking_status",
];

/// Number of trees in the severity forest.
pub const N_ESTIMATORS: usize = 100;

/// Fixed seed so retraining the same data yields the same forest.
pub const RANDOM_STATE: u64 = 42;

/// One row of inference inputs: a label per consumed survey field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    /// Age bracket label (ordinal; unknown labels default)
    pub age_group: String,
    /// Education level label (ordinal; unknown labels default)
    pub education_level: String,
    /// Employment status label (ordinal; unknown labels default)
    pub employment_status: String,
    /// Gender label (categorical; must be in the fitted set)
    pub gender: String,
    /// Skill alignment label (categorical; must be in the fitted set)
    pub skill_alignment: String,
    /// Skill training label (categorical; must be in the fitted set)
    pub skill_training: String,
    /// Job-seeking status label (categorical; must be in the fitted set)
    pub job_seeking_status: String,
}

/// Diagnostics from a training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Records used after cleaning
    pub n_records: usize,
    /// R² of the fitted forest on its own training data
    pub r_squared: f32,
    /// Per-feature importances in feature order, normalized to sum to 1
    pub feature_importances: Vec<(String, f32)>,
}

/// A completed training run: the persistable bundle plus diagnostics.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    /// The bundle to persist and serve
    pub bundle: ModelBundle,
    /// Training diagnostics
    pub report: TrainingReport,
}

/// Runs the full training pipeline over raw survey records.
///
/// Cleans the records (all-blank rows dropped, fields trimmed, missing
/// values replaced by the sentinel), derives the ordinal columns and the
/// target severity score, fits one label encoder per categorical field,
/// assembles the feature matrix in [`FEATURE_NAMES`] order, and fits the
/// seeded 100-tree forest. The returned bundle is internally consistent:
/// the model saw only vectors produced by exactly these encoders and maps
/// in exactly this order.
///
/// # Errors
///
/// Returns an error if no usable records remain after cleaning or the
/// model cannot be fitted. No partial bundle is ever produced.
pub fn train(records: Vec<SurveyRecord>) -> Result<TrainedModel> {
    let records = dataset::clean_records(records);
    if records.is_empty() {
        return Err("training set is empty after cleaning".into());
    }

    let maps = OrdinalMaps::standard();

    let ordinal_column = |field: OrdinalField| -> Vec<f32> {
        records
            .iter()
            .map(|r| {
                let label = match field {
                    OrdinalField::AgeGroup => &r.age_group,
                    OrdinalField::EducationLevel => &r.education_level,
                    OrdinalField::EmploymentStatus => &r.employment_status,
                };
                maps.code(field, label) as f32
            })
            .collect()
    };

    let age = ordinal_column(OrdinalField::AgeGroup);
    let education = ordinal_column(OrdinalField::EducationLevel);
    let employment = ordinal_column(OrdinalField::EmploymentStatus);

    let target: Vec<f32> = records
        .iter()
        .map(|r| severity_score(&r.issue_severity_perception))
        .collect();

    let encoders = EncoderSet {
        gender: LabelEncoder::fit("gender", records.iter().map(|r| r.gender.as_str())),
        skill_alignment: LabelEncoder::fit(
            "skill_alignment",
            records.iter().map(|r| r.skill_alignment.as_str()),
        ),
        skill_training: LabelEncoder::fit(
            "skill_training",
            records.iter().map(|r| r.skill_training.as_str()),
        ),
        job_seeking_status: LabelEncoder::fit(
            "job_seeking_status",
            records.iter().map(|r| r.job_seeking_status.as_str()),
        ),
    };

    let code_column = |encoder: &LabelEncoder, values: Vec<&str>| -> Result<Vec<f32>> {
        Ok(encoder
            .transform(values)?
            .into_iter()
            .map(|c| c as f32)
            .collect())
    };

    let gender = code_column(
        &encoders.gender,
        records.iter().map(|r| r.gender.as_str()).collect(),
    )?;
    let skill_alignment = code_column(
        &encoders.skill_alignment,
        records.iter().map(|r| r.skill_alignment.as_str()).collect(),
    )?;
    let skill_training = code_column(
        &encoders.skill_training,
        records.iter().map(|r| r.skill_training.as_str()).collect(),
    )?;
    let job_seeking = code_column(
        &encoders.job_seeking_status,
        records
            .iter()
            .map(|r| r.job_seeking_status.as_str())
            .collect(),
    )?;

    let df = DataFrame::new(vec![
        ("age_ordinal".to_string(), Vector::from_vec(age)),
        ("education_ordinal".to_string(), Vector::from_vec(education)),
        ("employment_ordinal".to_string(), Vector::from_vec(employment)),
        ("gender".to_string(), Vector::from_vec(gender)),
        (
            "skill_alignment".to_string(),
            Vector::from_vec(skill_alignment),
        ),
        (
            "skill_training".to_string(),
            Vector::from_vec(skill_training),
        ),
        ("job_seeking_status".to_string(), Vector::from_vec(job_seeking)),
    ])?;

    let x = df.select(&FEATURE_NAMES)?.to_matrix();
    let y = Vector::from_vec(target);

    let mut model = RandomForestRegressor::new(N_ESTIMATORS).with_random_state(RANDOM_STATE);
    model.fit(&x, &y)?;

    let r_squared = model.score(&x, &y);
    let feature_importances = FEATURE_NAMES
        .iter()
        .map(|n| (*n).to_string())
        .zip(model.feature_importances().unwrap_or_default())
        .collect();

    tracing::info!(
        records = records.len(),
        r_squared,
        "training pipeline complete"
    );

    Ok(TrainedModel {
        bundle: ModelBundle {
            model,
            encoders,
            maps,
            feature_names: FEATURE_NAMES.iter().map(|n| (*n).to_string()).collect(),
        },
        report: TrainingReport {
            n_records: records.len(),
            r_squared,
            feature_importances,
        },
    })
}

/// Loads the survey dataset from a CSV file and trains on it.
///
/// # Errors
///
/// Returns [`crate::error::SondeoError::DataUnavailable`] when the source
/// cannot be located or parsed; the pipeline aborts before any bundle
/// exists.
pub fn train_from_csv<P: AsRef<Path>>(path: P) -> Result<TrainedModel> {
    let records = dataset::load_csv(path)?;
    train(records)
}

/// Runs single-row inference against a loaded bundle.
///
/// Ordinal selections go through the bundle's maps and default on unknown
/// labels; categorical selections go through the bundle's encoders and
/// fail with an unknown-category error on labels outside the fitted set
/// (the menus derive from that set, so a miss indicates a stale bundle or
/// a programming error). The feature vector is assembled in the order the
/// bundle records. No side effects beyond the returned score.
///
/// # Errors
///
/// Returns [`crate::error::SondeoError::UnknownCategory`] for an unfitted
/// categorical label.
pub fn predict(bundle: &ModelBundle, selections: &Selections) -> Result<f32> {
    let mut features = Vec::with_capacity(bundle.feature_names.len());

    for name in &bundle.feature_names {
        let value = match name.as_str() {
            "age_ordinal" => bundle.maps.code(OrdinalField::AgeGroup, &selections.age_group) as f32,
            "education_ordinal" => {
                bundle
                    .maps
                    .code(OrdinalField::EducationLevel, &selections.education_level) as f32
            }
            "employment_ordinal" => {
                bundle
                    .maps
                    .code(OrdinalField::EmploymentStatus, &selections.employment_status)
                    as f32
            }
            "gender" => bundle.encoders.gender.encode(&selections.gender)? as f32,
            "skill_alignment" => {
                bundle
                    .encoders
                    .skill_alignment
                    .encode(&selections.skill_alignment)? as f32
            }
            "skill_training" => {
                bundle
                    .encoders
                    .skill_training
                    .encode(&selections.skill_training)? as f32
            }
            "job_seeking_status" => {
                bundle
                    .encoders
                    .job_seeking_status
                    .encode(&selections.job_seeking_status)? as f32
            }
            other => {
                return Err(format!("bundle records unexpected feature '{other}'").into());
            }
        };
        features.push(value);
    }

    let score = bundle.model.predict_one(&features);
    tracing::debug!(score, "inference complete");
    Ok(score)
}
