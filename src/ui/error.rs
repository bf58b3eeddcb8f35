//! REST API error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// Client-visible REST failure, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid request field
    #[error("{0}")]
    Validation(String),

    /// Referenced room does not exist
    #[error("room {0} does not exist")]
    NotFound(i64),

    /// Room name conflict
    #[error("{0}")]
    Conflict(String),

    /// Persistence backend failure; details stay in the server log
    #[error("storage backend unavailable")]
    Internal,
}

impl From<ValueObjectError> for ApiError {
    fn from(err: ValueObjectError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateRoomName(_) => Self::Conflict(err.to_string()),
            RepositoryError::RoomNotFound(room_id) => Self::NotFound(room_id),
            RepositoryError::Backend(e) => {
                tracing::error!("storage backend failure: {e}");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
