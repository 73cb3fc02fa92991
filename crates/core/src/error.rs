use crate::types::DbId;

/// Domain-level error type shared across the workspace.
///
/// The API crate maps each variant onto an HTTP status code; see
/// `alinea-api`'s `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request conflicts with existing state (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An invariant was broken; treated as a bug, not user error.
    #[error("Internal error: {0}")]
    Internal(String),
}
