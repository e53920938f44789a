//! Error handling for the Farm Advisor backend
//!
//! Every handler error is rendered as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ErrorBody, MISSING_ADVICE_FIELDS};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("{0}")]
    MissingInput(String),

    #[error("Missing advice fields")]
    MissingAdviceFields,

    // Disease model errors
    #[error("Disease model is not available.")]
    ModelUnavailable,

    #[error("Failed to process the image: {0}")]
    ProcessingFailure(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_) | AppError::MissingAdviceFields => StatusCode::BAD_REQUEST,
            AppError::ModelUnavailable
            | AppError::ProcessingFailure(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client; processing details stay in the logs
    pub fn client_message(&self) -> String {
        match self {
            AppError::MissingInput(msg) => msg.clone(),
            AppError::MissingAdviceFields => MISSING_ADVICE_FIELDS.to_string(),
            AppError::ModelUnavailable => "Disease model is not available.".to_string(),
            AppError::ProcessingFailure(_) => "Failed to process the image.".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (status, Json(ErrorBody::new(self.client_message()))).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::MissingInput("No image file provided.".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::MissingAdviceFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::ModelUnavailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::ProcessingFailure("bad png".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_processing_detail_not_leaked() {
        let err = AppError::ProcessingFailure("invalid PNG signature".into());
        assert_eq!(err.client_message(), "Failed to process the image.");
    }

    #[test]
    fn test_missing_fields_message() {
        assert_eq!(
            AppError::MissingAdviceFields.client_message(),
            "Missing data. Required fields are: crop_name, district, state, crop_status"
        );
    }
}
