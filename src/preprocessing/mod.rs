//! Preprocessing transformers for categorical survey fields.
//!
//! Each free-form categorical field gets its own [`LabelEncoder`], fitted
//! once during training over the distinct values observed in the dataset
//! and reused unchanged at inference time. The fitted label set is frozen:
//! encoding a label outside it is a typed error, not a silent default,
//! because the persisted model only understands codes minted at fit time.

use crate::error::{Result, SondeoError};
use serde::{Deserialize, Serialize};

/// Bidirectional label ↔ code table for one categorical field.
///
/// Codes are dense, zero-based, and assigned in lexicographic label order,
/// so fitting the same value set always yields the same table.
///
/// # Examples
///
/// ```
/// use sondeo::preprocessing::LabelEncoder;
///
/// let encoder = LabelEncoder::fit("gender", ["Male", "Female", "Male"]);
/// assert_eq!(encoder.classes(), ["Female", "Male"]);
/// assert_eq!(encoder.encode("Female").unwrap(), 0);
/// assert_eq!(encoder.decode(1).unwrap(), "Male");
/// assert!(encoder.encode("Robot").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    field: String,
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fits an encoder over the observed values of one field.
    ///
    /// Values are trimmed of surrounding whitespace, deduplicated, and
    /// sorted lexicographically; each distinct label gets the next dense
    /// code starting from 0.
    pub fn fit<I, S>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .collect();
        classes.sort_unstable();
        classes.dedup();

        Self {
            field: field.to_string(),
            classes,
        }
    }

    /// Field name this encoder was fitted for.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The fitted labels in code order (code `i` decodes to `classes()[i]`).
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct fitted labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True when the encoder has no fitted labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Encodes a label to its dense code.
    ///
    /// # Errors
    ///
    /// Returns [`SondeoError::UnknownCategory`] for labels outside the
    /// fitted set.
    pub fn encode(&self, label: &str) -> Result<i32> {
        let label = label.trim();
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map(|idx| idx as i32)
            .map_err(|_| SondeoError::unknown_category(&self.field, label))
    }

    /// Decodes a code back to its label.
    ///
    /// # Errors
    ///
    /// Returns [`SondeoError::UnknownCode`] for codes outside `0..len()`.
    pub fn decode(&self, code: i32) -> Result<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(String::as_str)
            .ok_or(SondeoError::UnknownCode {
                field: self.field.clone(),
                code,
            })
    }

    /// Encodes a whole column of values.
    ///
    /// # Errors
    ///
    /// Returns the first [`SondeoError::UnknownCategory`] encountered.
    pub fn transform<I, S>(&self, values: I) -> Result<Vec<i32>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|v| self.encode(v.as_ref()))
            .collect()
    }
}

/// The four independent encoders carried by a model bundle, one per
/// free-form categorical field. No shared state between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderSet {
    /// Free-form gender label encoder
    pub gender: LabelEncoder,
    /// Skill alignment ("do your skills match the market") encoder
    pub skill_alignment: LabelEncoder,
    /// Skill training participation encoder
    pub skill_training: LabelEncoder,
    /// Job-seeking status encoder
    pub job_seeking_status: LabelEncoder,
}

impl EncoderSet {
    /// Iterates the encoders in feature order.
    pub fn iter(&self) -> impl Iterator<Item = &LabelEncoder> {
        [
            &self.gender,
            &self.skill_alignment,
            &self.skill_training,
            &self.job_seeking_status,
        ]
        .into_iter()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
