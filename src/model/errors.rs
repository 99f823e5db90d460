//! Model error types

use thiserror::Error;

/// Result type for record operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building or mutating a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Timestamp text does not match `YYYY-MM-DDTHH:MM:SS.ffffff`
    #[error("malformed timestamp in {field}: {value:?}")]
    MalformedTimestamp { field: String, value: String },

    /// A field every record must carry is absent
    #[error("missing field: {0}")]
    MissingField(String),

    /// Value cannot be stored in the named field
    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Identity and timestamps are never assigned directly
    #[error("field is read-only: {0}")]
    ReadOnlyField(String),
}

impl ModelError {
    /// Returns a stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::MalformedTimestamp { .. } => "HBNB_MALFORMED_TIMESTAMP",
            ModelError::MissingField(_) => "HBNB_MISSING_FIELD",
            ModelError::InvalidField { .. } => "HBNB_INVALID_FIELD",
            ModelError::ReadOnlyField(_) => "HBNB_READ_ONLY_FIELD",
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ModelError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
