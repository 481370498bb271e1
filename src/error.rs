//! Error types shared by the feature builder, the classifiers and the harness.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MatchformError>;

#[derive(Error, Debug)]
pub enum MatchformError {
    /// A required field is absent or of the wrong kind.
    #[error("schema error on field `{field}`: {reason}")]
    Schema { field: String, reason: String },

    /// Too little data to form a partition or fit a model.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("model not fitted")]
    ModelNotFitted,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MatchformError {
    pub(crate) fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
