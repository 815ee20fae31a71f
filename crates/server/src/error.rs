//! API errors and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use expense_assistant::AssistantError;
use expense_features::DataError;
use thiserror::Error;

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    InvalidData(#[from] DataError),

    #[error("Bill validation is not configured")]
    AssistantUnavailable,

    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) | ApiError::InvalidData(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::AssistantUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Assistant(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;
