use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use senpai_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `senpai_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type ErrorParts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn core_parts(core: &CoreError) -> ErrorParts {
    match core {
        CoreError::NotFound { entity, key } => {
            tracing::debug!(entity = %entity, key = %key, "Not found");
            not_found(format!("{entity} not found"))
        }
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Map a sqlx error onto a response.
///
/// | Error                                      | Status |
/// |--------------------------------------------|--------|
/// | `RowNotFound`                              | 404    |
/// | unique violation (23505) on a `uq_*` name  | 409    |
/// | foreign key violation (23503)              | 404    |
/// | anything else                              | 500    |
///
/// A foreign key violation means the owning user row is gone, e.g. a
/// token that outlived its account.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    match err {
        sqlx::Error::RowNotFound => not_found("Resource not found".to_string()),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => match db_err.constraint() {
                Some(name) if name.starts_with("uq_") => {
                    (StatusCode::CONFLICT, "CONFLICT", conflict_message(name))
                }
                _ => {
                    tracing::error!(error = %db_err, "Unclassified unique violation");
                    internal()
                }
            },
            Some("23503") => not_found("Resource not found".to_string()),
            _ => {
                tracing::error!(error = %db_err, "Database error");
                internal()
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

/// User-facing wording for known unique constraints.
fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "Email already exists".to_string(),
        "uq_favorites_user_category_item" => "Already saved".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

fn not_found(message: String) -> ErrorParts {
    (StatusCode::NOT_FOUND, "NOT_FOUND", message)
}

/// Detail is logged by the caller, never returned.
fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
