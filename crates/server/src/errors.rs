use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;

/// Wire-level errors of the JSON API.
///
/// Two 404 shapes exist on purpose: restaurant lookups answer with a
/// single `{"error": ...}` object, while the create-association route
/// reports every failure as `{"errors": [...]}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("validation errors")]
    Validation(Vec<String>),
    #[error("{0}")]
    MissingReference(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl ApiError {
    pub fn restaurant_not_found() -> Self {
        Self::NotFound("Restaurant not found".into())
    }

    pub fn validation_errors() -> Self {
        Self::Validation(vec!["validation errors".into()])
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(_) => Self::validation_errors(),
            ModelError::NotFound(msg) => Self::NotFound(msg),
            ModelError::Db(msg) => Self::Persistence(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": msg}))).into_response()
            }
            ApiError::Validation(msgs) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({"errors": msgs}))).into_response()
            }
            ApiError::MissingReference(msg) => {
                (StatusCode::NOT_FOUND, Json(serde_json::json!({"errors": [msg]}))).into_response()
            }
            ApiError::Persistence(msg) => {
                error!(error = %msg, "persistence failure");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({"errors": [msg]})))
                    .into_response()
            }
        }
    }
}
