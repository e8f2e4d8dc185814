use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    credentials::AuthError, models::ErrorResponse, repository::RepositoryError,
    storage::StorageError,
};

/// ApiError
///
/// Everything a handler can fail with, mapped to a status code and a JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Repository(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        // Storage details stay in the logs.
        let message = match &self {
            ApiError::Storage(e) => {
                tracing::error!("Session storage failure: {}", e);
                "Session storage unavailable".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
