// src/error.rs

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Global Application Error Enum.
/// Every route reports failures through this type so the status code and
/// body shape are the same across the API.
#[derive(Debug, Error)]
pub enum AppError {
    // 400 Bad Request: missing or malformed input
    #[error("{0}")]
    BadRequest(String),

    // 403: the scanned QR token is not the one on the teacher's screen
    #[error("Invalid QR code. Please scan the current one from the teacher screen.")]
    TokenMismatch,

    // 403: submission position is outside the campus geofence
    #[error("You are outside the allowed college area ({distance_m:.0} m away).")]
    OutsideGeofence { distance_m: f64 },

    // 413: request body over the configured limit
    #[error("Request body too large.")]
    PayloadTooLarge,

    // 401 Unauthorized
    #[error("{0}")]
    AuthError(String),

    // 404 Not Found
    #[error("{0}")]
    NotFound(String),

    // 409 Conflict (duplicate vote or username)
    #[error("{0}")]
    Conflict(String),

    // 500: flat-file store failure, including malformed JSON on disk
    #[error(transparent)]
    Storage(#[from] StoreError),

    // 500 Internal Server Error
    #[error("{0}")]
    InternalServerError(String),
}

/// Converts the error into `{ "success": false, "message": ... }` with the
/// matching HTTP status. Server-side details are logged, not returned.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TokenMismatch | AppError::OutsideGeofence { .. } => StatusCode::FORBIDDEN,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal Server Error: {}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
