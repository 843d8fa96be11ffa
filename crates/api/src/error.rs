use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use easytask_core::error::CoreError;
use serde_json::json;

use crate::middleware::alert::Alert;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `easytask_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id = %id, "Entity not found");
                    return StatusCode::NOT_FOUND.into_response();
                }
                CoreError::BadRequestAlert { entity, error_key } => {
                    let body = json!({
                        "error": error_key.title(),
                        "code": "BAD_REQUEST",
                        "entityName": entity,
                        "errorKey": error_key.as_str(),
                        "message": format!("error.{error_key}"),
                    });
                    let mut response = (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
                    response.extensions_mut().insert(Alert::Failure {
                        entity: *entity,
                        error_key: *error_key,
                    });
                    return response;
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
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

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Integrity constraint violations (SQLSTATE class `23`: unique, not-null,
///   foreign key, check) are not recovered and map to 500 with
///   `CONSTRAINT_VIOLATION`, naming the constraint when PostgreSQL reports one.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err)
            if db_err.code().is_some_and(|code| code.starts_with("23")) =>
        {
            let constraint = db_err.constraint().unwrap_or("unknown");
            tracing::warn!(error = %db_err, constraint, "Constraint violation");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONSTRAINT_VIOLATION",
                format!("Constraint violation: {constraint}"),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
