//! API error type and its HTTP rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use super::validators::ValidationError;
use crate::db::DbError;

/// Error response DTO
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Entity not found: Todo with id '7'")]
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Client input errors are plain text, e.g. "Invalid Todo Status"
            ApiError::Validation(e) => {
                return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
            }
            ApiError::Database(DbError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Database(DbError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Io(_) => {
                error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
