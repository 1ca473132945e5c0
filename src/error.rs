//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from store operations
/// - **Resource Errors**: Requested gift card not found
/// - **State Errors**: Operation not allowed for the card's current status
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// `#[from]` implements `From<sqlx::Error> for AppError` so store code can use `?`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No gift card matches the given id or code.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Gift card not found for ID/code: {0}")]
    GiftCardNotFound(String),

    /// The gift card's status forbids the requested operation.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidGiftCardState(String),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A sum of stored amounts does not fit in an `i64` of cents.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Amount overflow while computing {0}")]
    AmountOverflow(&'static str),
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `GiftCardNotFound` → 404 Not Found
/// - `InvalidGiftCardState` → 400 Bad Request
/// - `InvalidRequest` → 400 Bad Request
/// - `AmountOverflow` → 500 Internal Server Error
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::GiftCardNotFound(_) => (
                StatusCode::NOT_FOUND,
                "gift_card_not_found",
                self.to_string(),
            ),
            AppError::InvalidGiftCardState(ref reason) => {
                (StatusCode::BAD_REQUEST, "invalid_state", reason.clone())
            }
            AppError::InvalidRequest(ref reason) => {
                (StatusCode::BAD_REQUEST, "invalid_request", reason.clone())
            }
            AppError::AmountOverflow(what) => {
                tracing::error!(computing = what, "Amount overflow");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "amount_overflow",
                    self.to_string(),
                )
            }
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
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
