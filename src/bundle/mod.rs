//! The persisted inference bundle.
//!
//! A [`ModelBundle`] is the sole contract between training and inference:
//! the fitted forest, the four fitted label encoders, the ordinal maps, and
//! the feature order travel as one atomic unit. The training pipeline
//! creates it once; inference processes load it read-only and never mutate
//! it. Saving goes through a temp file in the target directory followed by
//! a rename, so a concurrent reader observes either a complete prior
//! bundle or none.

use crate::error::{Result, SondeoError};
use crate::features::OrdinalMaps;
use crate::preprocessing::EncoderSet;
use crate::tree::RandomForestRegressor;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Immutable snapshot of everything inference needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    /// Fitted severity model
    pub model: RandomForestRegressor,
    /// Fitted categorical encoders, one per free-form field
    pub encoders: EncoderSet,
    /// Static ordinal maps used at fit time
    pub maps: OrdinalMaps,
    /// Feature column order the model was fitted on
    pub feature_names: Vec<String>,
}

impl ModelBundle {
    /// Serializes the bundle to `path`, atomically.
    ///
    /// The bytes land in a temp file next to the target and are renamed
    /// into place, so no reader ever sees a partially written bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes =
            bincode::serialize(self).map_err(|e| SondeoError::Serialization(e.to_string()))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(path).map_err(|e| SondeoError::Io(e.error))?;

        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            "model bundle saved"
        );
        Ok(())
    }

    /// Loads a bundle from `path`.
    ///
    /// # Errors
    ///
    /// A missing or corrupt blob yields [`SondeoError::AssetsUnavailable`],
    /// the soft condition callers degrade on (see [`ModelBundle::try_load`]).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| SondeoError::AssetsUnavailable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let bundle: Self =
            bincode::deserialize(&bytes).map_err(|e| SondeoError::AssetsUnavailable {
                path: path.display().to_string(),
                message: format!("corrupt bundle: {e}"),
            })?;

        tracing::info!(path = %path.display(), "model bundle loaded");
        Ok(bundle)
    }

    /// Loads a bundle, mapping any unavailability to `None`.
    ///
    /// This is the sentinel form for inference surfaces: no bundle means
    /// "prediction feature unavailable," not a crash.
    #[must_use]
    pub fn try_load<P: AsRef<Path>>(path: P) -> Option<Self> {
        match Self::load(path) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                tracing::warn!(error = %e, "no usable model bundle");
                None
            }
        }
    }

    /// Selection menus for the inference surface: every input field paired
    /// with the labels a caller may pick from.
    ///
    /// Ordinal fields list their map's labels in rank order; categorical
    /// fields list the fitted encoder classes. Selections taken from these
    /// menus are guaranteed to encode without an unknown-category error.
    #[must_use]
    pub fn selection_options(&self) -> Vec<(String, Vec<String>)> {
        let mut options = Vec::with_capacity(7);

        for (name, map) in [
            ("age_group", &self.maps.age),
            ("education_level", &self.maps.education),
            ("employment_status", &self.maps.employment),
        ] {
            options.push((
                name.to_string(),
                map.labels().iter().map(|l| (*l).to_string()).collect(),
            ));
        }

        for encoder in self.encoders.iter() {
            options.push((encoder.field().to_string(), encoder.classes().to_vec()));
        }

        options
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
