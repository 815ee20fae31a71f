//! Feature derivation errors

use thiserror::Error;

/// Errors from the feature deriver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Invalid {field}: {value:?} is not a calendar date (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

/// Result type for feature derivation
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    pub fn invalid_date(field: &'static str, value: impl Into<String>) -> Self {
        DataError::InvalidDate {
            field,
            value: value.into(),
        }
    }

    /// Name of the record field that failed to parse
    pub fn field(&self) -> &'static str {
        match self {
            DataError::InvalidDate { field, .. } => field,
        }
    }
}
