use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cauldron_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds store and HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A driver error from the store.
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Field-level validation failures from a request body.
    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Field-level failures carry a per-field detail array the other
            // variants do not have.
            AppError::Validation(errors) => return validation_response(errors),

            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.to_string())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Database(err) => classify_db_error(err),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a driver error into an HTTP status, error code, and message.
///
/// - Unique-index violations (server code 11000) map to 409.
/// - Everything else maps to 500 with a sanitized message; the raw driver
///   error goes to the log, not the caller.
fn classify_db_error(err: &mongodb::error::Error) -> (StatusCode, &'static str, String) {
    if cauldron_db::is_duplicate_key_error(err) {
        return (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Duplicate value violates a unique index".to_string(),
        );
    }
    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Build the 400 response for body validation failures, with one entry per
/// failed field check.
fn validation_response(errors: &validator::ValidationErrors) -> Response {
    let details: Vec<serde_json::Value> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |err| {
                json!({
                    "field": field,
                    "message": err
                        .message
                        .as_deref()
                        .unwrap_or("invalid value"),
                })
            })
        })
        .collect();

    let body = json!({
        "error": "Validation failed",
        "code": "VALIDATION_ERROR",
        "errors": details,
    });

    (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
}
