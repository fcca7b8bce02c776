//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("{0}")]
    Validation(String),
}

/// Repository-level errors.
///
/// `NotFound`, `Constraint` and `InvalidReference` describe something the
/// caller asked for and are safe to show to them. `Connection` and `Query`
/// carry driver detail and stay in the logs.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

impl RepoError {
    /// Not-found error for a row of the given entity.
    pub fn not_found(entity_type: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{entity_type} with id {id} not found"))
    }

    /// Whether the failure was caused by the request rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Constraint(_) | Self::InvalidReference(_)
        )
    }
}
