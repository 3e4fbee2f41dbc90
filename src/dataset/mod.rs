//! Survey dataset ingestion and cleaning.
//!
//! Reads the delimited survey-response file (Latin-1 compatible text, fixed
//! header contract), producing one [`SurveyRecord`] per row. Cleaning
//! normalizes the raw responses the same way at every consumer: rows that
//! are blank across all fields are dropped, remaining fields are trimmed,
//! and missing entries become the explicit [`MISSING_SENTINEL`] so that
//! grouping and encoding never see an empty string.

use crate::error::{Result, SondeoError};
use std::path::Path;

/// Sentinel replacing missing or blank textual values after cleaning.
pub const MISSING_SENTINEL: &str = "Unknown";

/// Header fields the source file must carry, in contract order.
pub const EXPECTED_COLUMNS: [&str; 9] = [
    "age_group",
    "education_level",
    "employment_status",
    "gender",
    "skill_alignment",
    "skill_training",
    "job_seeking_status",
    "issue_severity_perception",
    "proposed_solution",
];

/// One survey response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurveyRecord {
    /// Respondent age bracket
    pub age_group: String,
    /// Highest education level reached
    pub education_level: String,
    /// Current employment status
    pub employment_status: String,
    /// Free-form gender label
    pub gender: String,
    /// Whether the respondent's skills match market demand
    pub skill_alignment: String,
    /// Whether the respondent received skill training
    pub skill_training: String,
    /// Job-seeking status
    pub job_seeking_status: String,
    /// Perceived issue severity (Yes / Maybe / No)
    pub issue_severity_perception: String,
    /// Free-text proposed solution
    pub proposed_solution: String,
}

impl SurveyRecord {
    /// All fields in header order.
    #[must_use]
    pub fn fields(&self) -> [&str; 9] {
        [
            &self.age_group,
            &self.education_level,
            &self.employment_status,
            &self.gender,
            &self.skill_alignment,
            &self.skill_training,
            &self.job_seeking_status,
            &self.issue_severity_perception,
            &self.proposed_solution,
        ]
    }

    /// True when every field is blank (whitespace-only counts as blank).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(|f| f.trim().is_empty())
    }
}

/// Loads the raw survey dataset from a Latin-1 encoded CSV file.
///
/// Rows come back as-read (untrimmed, possibly empty fields); run
/// [`clean_records`] before feeding them to the training pipeline.
///
/// # Errors
///
/// Returns [`SondeoError::DataUnavailable`] when the file is missing,
/// unreadable, or lacks a required column, and [`SondeoError::CsvParse`]
/// when a row cannot be parsed.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SurveyRecord>> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|e| SondeoError::DataUnavailable {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    // Survey exports arrive in a Latin-1 compatible charset, not UTF-8.
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);

    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SondeoError::DataUnavailable {
            path: path.display().to_string(),
            message: format!("failed to read CSV header: {e}"),
        })?
        .clone();

    let mut column_idx = [0usize; 9];
    for (slot, &name) in column_idx.iter_mut().zip(EXPECTED_COLUMNS.iter()) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| SondeoError::DataUnavailable {
                path: path.display().to_string(),
                message: format!("missing required column '{name}'"),
            })?;
    }

    let mut records = Vec::new();
    for (row_num, row) in reader.records().enumerate() {
        // Header is line 1.
        let line = row_num + 2;
        let row = row.map_err(|e| SondeoError::CsvParse {
            line,
            message: e.to_string(),
        })?;

        let field = |i: usize| row.get(column_idx[i]).unwrap_or("").to_string();
        records.push(SurveyRecord {
            age_group: field(0),
            education_level: field(1),
            employment_status: field(2),
            gender: field(3),
            skill_alignment: field(4),
            skill_training: field(5),
            job_seeking_status: field(6),
            issue_severity_perception: field(7),
            proposed_solution: field(8),
        });
    }

    tracing::info!(
        rows = records.len(),
        path = %path.display(),
        "survey dataset loaded"
    );

    Ok(records)
}

/// Cleans raw records: drops all-blank rows, trims every field, and
/// replaces missing values with [`MISSING_SENTINEL`].
///
/// After cleaning, no record holds an empty field.
#[must_use]
pub fn clean_records(records: Vec<SurveyRecord>) -> Vec<SurveyRecord> {
    let clean = |value: String| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            MISSING_SENTINEL.to_string()
        } else {
            trimmed.to_string()
        }
    };

    records
        .into_iter()
        .filter(|r| !r.is_blank())
        .map(|r| SurveyRecord {
            age_group: clean(r.age_group),
            education_level: clean(r.education_level),
            employment_status: clean(r.employment_status),
            gender: clean(r.gender),
            skill_alignment: clean(r.skill_alignment),
            skill_training: clean(r.skill_training),
            job_seeking_status: clean(r.job_seeking_status),
            issue_severity_perception: clean(r.issue_severity_perception),
            proposed_solution: clean(r.proposed_solution),
        })
        .collect()
}

/// Headline statistics over a cleaned dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveySummary {
    /// Number of usable records
    pub n_records: usize,
    /// Share of respondents with employment status "Unemployed", in [0, 1]
    pub unemployment_rate: f32,
}

/// Computes the headline statistics over cleaned records.
#[must_use]
pub fn summarize(records: &[SurveyRecord]) -> SurveySummary {
    let n_records = records.len();
    let unemployed = records
        .iter()
        .filter(|r| r.employment_status == "Unemployed")
        .count();

    let unemployment_rate = if n_records == 0 {
        0.0
    } else {
        unemployed as f32 / n_records as f32
    };

    SurveySummary {
        n_records,
        unemployment_rate,
    }
}
