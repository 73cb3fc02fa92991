//! HTTP error mapping.
//!
//! Handlers return [`AppResult`]; every failure funnels through
//! [`AppError::into_response`] so clients always see the same body shape:
//! `{"error": <message>, "code": <stable machine code>}`. Messages for 500s
//! are sanitized; the real cause goes to the log, never the wire.

use alinea_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

/// What a handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain failures from `alinea-core` (not-found, validation, conflict,
    /// auth). Each maps to its own status below.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Anything sqlx surfaced. Schema constraint names decide the status:
    /// see [`map_database_error`].
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed input caught before it reaches the domain layer, such as
    /// an unknown patient status or a non-image avatar upload.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Filesystem and other infrastructure failures. The message is for the
    /// log; the client gets a generic 500.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => map_core_error(core),
            AppError::Database(err) => map_database_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

fn map_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
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

/// Turn a sqlx error into a status, code, and client-safe message.
///
/// `RowNotFound` is a 404. A Postgres 23505 on one of the schema's `uq_`
/// constraints (`uq_users_email`, `uq_patients_rut`,
/// `uq_appointments_todoist_task_id`) is a 409, since those all guard
/// caller-visible uniqueness. Any other database failure is logged and
/// answered with a generic 500.
fn map_database_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint().is_some_and(|c| c.starts_with("uq_")) =>
        {
            let constraint = db_err.constraint().unwrap_or_default();
            (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Duplicate value violates unique constraint: {constraint}"),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
