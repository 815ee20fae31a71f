//! Inference errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or running classifiers
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Failed to read model artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model artifact {path}: {reason}")]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("Model {model} produced a non-finite score")]
    NonFiniteScore { model: String },
}

/// Result type for inference operations
pub type InferenceResult<T> = Result<T, InferenceError>;

impl InferenceError {
    pub fn invalid_artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        InferenceError::InvalidArtifact {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
