use crate::utils::error::CardcastError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Error type that renders as a JSON `{"error": "..."}` response with the
/// status an admin client expects.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<CardcastError> for AppError {
    fn from(e: CardcastError) -> Self {
        match &e {
            CardcastError::ValidationError { message } => AppError::bad_request(message.clone()),
            CardcastError::NotFound { .. } => AppError::not_found(e.to_string()),
            _ => AppError::internal(e.to_string()),
        }
    }
}
