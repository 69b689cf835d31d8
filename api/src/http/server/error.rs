use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use org_messages_core::domain::common::CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,

    #[error("Service is currently unavailable")]
    ServiceUnavailable,

    #[error("Internal server error")]
    InternalServerError,

    #[error("Failed to start the server: {msg}")]
    StartupError { msg: String },
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError | ApiError::StartupError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::ServiceUnavailable(_) | CoreError::Unhealthy => {
                tracing::warn!(error = %error, "Backing store unavailable");
                ApiError::ServiceUnavailable
            }
            CoreError::DatabaseError { .. } | CoreError::DuplicateTitle { .. } => {
                tracing::error!(error = %error, "Unhandled core error");
                ApiError::InternalServerError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
