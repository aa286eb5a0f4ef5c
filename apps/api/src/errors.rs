use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::candidate_scores::ScoreError;
use crate::vectors::VectorDbError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM schema error: {0}")]
    Schema(#[from] ScoreError),

    #[error("Vector database error: {0}")]
    VectorDb(#[from] VectorDbError),
}

// Malformed or incomplete request bodies get the same error envelope.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Llm(_) | AppError::Schema(_) | AppError::VectorDb(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    "LLM_ERROR",
                    "The language model request failed".to_string(),
                )
            }
            AppError::Schema(e) => {
                tracing::error!("LLM schema error: {e}");
                (
                    "LLM_SCHEMA_ERROR",
                    "The language model returned an unexpected response".to_string(),
                )
            }
            AppError::VectorDb(e) => {
                tracing::error!("Vector database error: {e}");
                (
                    "VECTOR_DB_ERROR",
                    "A vector database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
