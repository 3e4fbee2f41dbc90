//! Ordinal feature maps and the severity target.
//!
//! The three ordinal survey fields (age group, education level, employment
//! status) carry a small, fixed, ranked label set. Each is mapped to integer
//! codes through a static table that is identical at training and inference
//! time. Unknown labels resolve to a per-field default code instead of
//! failing: free-text survey responses routinely fall outside the expected
//! set and must not halt the pipeline.
//!
//! The target severity score is derived the same way from the perception
//! field: Yes maps to 5, Maybe to 3, No to 1, anything else to the
//! mid-range default.

use serde::{Deserialize, Serialize};

/// The three ordinal survey fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrdinalField {
    /// Respondent age bracket
    AgeGroup,
    /// Highest education level reached
    EducationLevel,
    /// Current employment status
    EmploymentStatus,
}

/// A fixed label → code table for one ordinal field.
///
/// Entries are kept in rank order so selection menus list labels the way
/// the survey form did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalMap {
    entries: Vec<(String, i32)>,
    default_code: i32,
}

impl OrdinalMap {
    /// Builds a map from ranked (label, code) pairs and a default code.
    #[must_use]
    pub fn new(entries: &[(&str, i32)], default_code: i32) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(label, code)| ((*label).to_string(), *code))
                .collect(),
            default_code,
        }
    }

    /// Looks up a label's code; unknown labels get the default code.
    ///
    /// Surrounding whitespace is ignored. Never fails.
    #[must_use]
    pub fn code(&self, label: &str) -> i32 {
        let label = label.trim();
        self.entries
            .iter()
            .find(|(known, _)| known == label)
            .map_or(self.default_code, |(_, code)| *code)
    }

    /// The code assigned to labels outside the table.
    #[must_use]
    pub fn default_code(&self) -> i32 {
        self.default_code
    }

    /// Known labels in rank order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }
}

/// The full set of ordinal maps carried by a model bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinalMaps {
    /// Age bracket map (default code 1)
    pub age: OrdinalMap,
    /// Education level map (default code 2)
    pub education: OrdinalMap,
    /// Employment status map (default code 1)
    pub employment: OrdinalMap,
}

impl OrdinalMaps {
    /// The standard survey tables.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            age: OrdinalMap::new(&[("18–24", 1), ("25–34", 2)], 1),
            education: OrdinalMap::new(
                &[("School level", 1), ("Undergraduate", 2), ("Postgraduate", 3)],
                2,
            ),
            employment: OrdinalMap::new(
                &[("Student", 1), ("Employed", 2), ("Unemployed", 3)],
                1,
            ),
        }
    }

    /// Map one ordinal field's label to its code (default on unknown).
    #[must_use]
    pub fn code(&self, field: OrdinalField, label: &str) -> i32 {
        self.map_for(field).code(label)
    }

    /// The map backing a given field.
    #[must_use]
    pub fn map_for(&self, field: OrdinalField) -> &OrdinalMap {
        match field {
            OrdinalField::AgeGroup => &self.age,
            OrdinalField::EducationLevel => &self.education,
            OrdinalField::EmploymentStatus => &self.employment,
        }
    }
}

impl Default for OrdinalMaps {
    fn default() -> Self {
        Self::standard()
    }
}

/// Mid-range score assigned to unmapped or missing perception labels.
pub const DEFAULT_SEVERITY: f32 = 3.0;

/// Derives the target severity score from the perception label.
///
/// Yes → 5, Maybe → 3, No → 1; anything else gets [`DEFAULT_SEVERITY`].
#[must_use]
pub fn severity_score(label: &str) -> f32 {
    match label.trim() {
        "Yes" => 5.0,
        "Maybe" => 3.0,
        "No" => 1.0,
        _ => DEFAULT_SEVERITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        let maps = OrdinalMaps::standard();
        assert_eq!(maps.code(OrdinalField::AgeGroup, "18–24"), 1);
        assert_eq!(maps.code(OrdinalField::AgeGroup, "25–34"), 2);
        assert_eq!(maps.code(OrdinalField::EducationLevel, "Postgraduate"), 3);
        assert_eq!(maps.code(OrdinalField::EmploymentStatus, "Employed"), 2);
    }

    #[test]
    fn test_unknown_labels_default_per_field() {
        let maps = OrdinalMaps::standard();
        assert_eq!(maps.code(OrdinalField::AgeGroup, "55+"), 1);
        assert_eq!(maps.code(OrdinalField::EducationLevel, "Doctorate"), 2);
        assert_eq!(maps.code(OrdinalField::EmploymentStatus, "Retired"), 1);
        assert_eq!(maps.code(OrdinalField::AgeGroup, ""), 1);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let maps = OrdinalMaps::standard();
        assert_eq!(maps.code(OrdinalField::EmploymentStatus, "  Student "), 1);
    }

    #[test]
    fn test_labels_in_rank_order() {
        let maps = OrdinalMaps::standard();
        assert_eq!(
            maps.education.labels(),
            vec!["School level", "Undergraduate", "Postgraduate"]
        );
    }

    #[test]
    fn test_severity_score() {
        assert_eq!(severity_score("Yes"), 5.0);
        assert_eq!(severity_score("Maybe"), 3.0);
        assert_eq!(severity_score("No"), 1.0);
        assert_eq!(severity_score("Unknown"), DEFAULT_SEVERITY);
        assert_eq!(severity_score(""), DEFAULT_SEVERITY);
        assert_eq!(severity_score(" Yes "), 5.0);
    }

    #[test]
    fn test_maps_serde_round_trip() {
        let maps = OrdinalMaps::standard();
        let bytes = bincode::serialize(&maps).expect("serialize should succeed");
        let back: OrdinalMaps = bincode::deserialize(&bytes).expect("deserialize should succeed");
        assert_eq!(maps, back);
    }
}
