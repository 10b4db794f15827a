use crate::types::DbId;

/// Domain-level error type shared by the repository layer, the versioning
/// engine, and the API handlers.
///
/// Variants map one-to-one onto caller-facing failure kinds:
/// validation problems are fixable by the caller, `Conflict` is retryable,
/// and `Store` deliberately carries no storage internals.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Store(String),
}
