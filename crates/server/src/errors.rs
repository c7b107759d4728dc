use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::{RepositoryError, ValidationError};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Handler failures mapped to HTTP responses with a `{"detail": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),
    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),
    #[error("User with ID {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Body(r) => r.status(),
            ApiError::Path(r) => r.status(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Repository(e) if e.is_unique_violation() => StatusCode::CONFLICT,
            ApiError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Repository(e) if e.is_unique_violation() => "username already registered".to_string(),
            other => other.to_string(),
        };
        match &self {
            ApiError::Repository(e) if status.is_server_error() => {
                error!(code = e.code(), error = %e, "repository failure")
            }
            ApiError::Repository(e) => warn!(code = e.code(), error = %e, "repository rejected request"),
            other => debug!(status = status.as_u16(), error = %other, "request rejected"),
        }
        (status, Json(serde_json::json!({"detail": detail}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl From<RepositoryError> for StartupError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Configuration { .. } => StartupError::InvalidConfig(e.to_string()),
            other => StartupError::Any(other.into()),
        }
    }
}
