//! Error types for Sondeo operations.
//!
//! Training-time failures are fatal and stop the pipeline before any bundle
//! is written. Inference-time failures are scoped to a single request.

use std::fmt;

/// Main error type for Sondeo operations.
///
/// # Examples
///
/// ```
/// use sondeo::error::SondeoError;
///
/// let err = SondeoError::UnknownCategory {
///     field: "gender".to_string(),
///     label: "never-seen".to_string(),
/// };
/// assert!(err.to_string().contains("unknown category"));
/// ```
#[derive(Debug)]
pub enum SondeoError {
    /// Source dataset missing or unreadable. Fatal to training.
    DataUnavailable {
        /// Path that was attempted
        path: String,
        /// Underlying failure description
        message: String,
    },

    /// A row of the source dataset could not be parsed.
    CsvParse {
        /// 1-based line number in the source file
        line: usize,
        /// Parse failure description
        message: String,
    },

    /// Categorical selection outside a fitted encoder's known label set.
    ///
    /// This is a hard boundary at inference time: the model was trained only
    /// on known codes, so any other label has no meaningful encoding.
    UnknownCategory {
        /// Field the encoder was fitted for
        field: String,
        /// The offending label
        label: String,
    },

    /// Encoded value outside a fitted encoder's code range.
    UnknownCode {
        /// Field the encoder was fitted for
        field: String,
        /// The offending code
        code: i32,
    },

    /// No model bundle present, or the blob on disk is not a valid bundle.
    ///
    /// Soft by contract: inference surfaces treat this as "prediction
    /// feature unavailable" rather than a crash (see
    /// [`crate::bundle::ModelBundle::try_load`]).
    AssetsUnavailable {
        /// Path that was attempted
        path: String,
        /// Underlying failure description
        message: String,
    },

    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SondeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SondeoError::DataUnavailable { path, message } => {
                write!(f, "Source dataset unavailable at {path}: {message}")
            }
            SondeoError::CsvParse { line, message } => {
                write!(f, "CSV parse error at line {line}: {message}")
            }
            SondeoError::UnknownCategory { field, label } => {
                write!(f, "unknown category for field '{field}': '{label}'")
            }
            SondeoError::UnknownCode { field, code } => {
                write!(f, "unknown code for field '{field}': {code}")
            }
            SondeoError::AssetsUnavailable { path, message } => {
                write!(f, "Model assets unavailable at {path}: {message}")
            }
            SondeoError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            SondeoError::Io(e) => write!(f, "I/O error: {e}"),
            SondeoError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            SondeoError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SondeoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SondeoError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SondeoError {
    fn from(err: std::io::Error) -> Self {
        SondeoError::Io(err)
    }
}

impl From<&str> for SondeoError {
    fn from(msg: &str) -> Self {
        SondeoError::Other(msg.to_string())
    }
}

impl From<String> for SondeoError {
    fn from(msg: String) -> Self {
        SondeoError::Other(msg)
    }
}

impl SondeoError {
    /// Create an unknown-category error for a fitted encoder field.
    #[must_use]
    pub fn unknown_category(field: &str, label: &str) -> Self {
        Self::UnknownCategory {
            field: field.to_string(),
            label: label.to_string(),
        }
    }

    /// True when the error is the soft "no assets" condition an inference
    /// surface should degrade on instead of failing.
    #[must_use]
    pub fn is_assets_unavailable(&self) -> bool {
        matches!(self, SondeoError::AssetsUnavailable { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SondeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_display() {
        let err = SondeoError::DataUnavailable {
            path: "missing.csv".to_string(),
            message: "file not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.csv"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_unknown_category_display() {
        let err = SondeoError::unknown_category("gender", "Robot");
        let msg = err.to_string();
        assert!(msg.contains("gender"));
        assert!(msg.contains("Robot"));
    }

    #[test]
    fn test_assets_unavailable_is_soft() {
        let err = SondeoError::AssetsUnavailable {
            path: "model.bin".to_string(),
            message: "no such file".to_string(),
        };
        assert!(err.is_assets_unavailable());
        assert!(!SondeoError::Other("x".to_string()).is_assets_unavailable());
    }

    #[test]
    fn test_csv_parse_display() {
        let err = SondeoError::CsvParse {
            line: 17,
            message: "unexpected field count".to_string(),
        };
        assert!(err.to_string().contains("line 17"));
    }

    #[test]
    fn test_from_str() {
        let err: SondeoError = "test error".into();
        assert!(matches!(err, SondeoError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SondeoError = io_err.into();
        assert!(matches!(err, SondeoError::Io(_)));
        use std::error::Error;
        assert!(err.source().is_some());
    }
}
