//! Error types for the story test-case generator

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Text-generation service failed (transport, auth, malformed response)
    #[error("Test case generation failed: {0}")]
    Generation(String),

    /// Tracker request could not be sent or its response could not be read
    #[error("Tracker request failed: {0}")]
    Tracker(String),

    /// Tracker answered with a non-success status
    #[error("Tracker returned {status}: {body}")]
    TrackerStatus { status: u16, body: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for API
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// HTTP status reported to the webhook caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Generation(_) | AppError::Tracker(_) | AppError::TrackerStatus { .. } => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            AppError::Config(_) => "configuration_error",
            AppError::Generation(_) => "generation_failed",
            AppError::Tracker(_) | AppError::TrackerStatus { .. } => "tracker_failed",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_response = ErrorResponse {
            status: "error",
            reason: self.reason().to_string(),
            details: Some(self.to_string()),
        };

        tracing::error!(
            error_type = %self,
            status_code = %status_code,
            "Request error"
        );

        (status_code, Json(json!(error_response))).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
