//! Assistant errors

use thiserror::Error;

/// Errors from the bill validation call
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Assistant returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Assistant configuration error: {0}")]
    Config(String),
}

/// Result type for assistant operations
pub type AssistantResult<T> = Result<T, AssistantError>;
