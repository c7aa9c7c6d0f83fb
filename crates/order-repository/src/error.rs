//! Repository error types.

use thiserror::Error;

/// Errors surfaced by order repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No order exists under the requested id.
    #[error("Order not found")]
    NotFound,

    /// A storage constraint was violated, e.g. creating an order whose id
    /// already exists.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A database or transaction failure, propagated unmodified.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
