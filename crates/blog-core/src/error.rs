//! Domain-level error types.

use thiserror::Error;

/// A post identifier string that is not a structurally valid store identifier.
///
/// This is distinct from "not found": a well-formed id that matches nothing is
/// an ordinary outcome, a malformed one is a client error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid post id: {0:?}")]
pub struct InvalidIdError(pub String);

/// Domain errors - failures surfaced to the boundary layer.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),

    #[error("Search term can't be empty")]
    EmptySearchTerm,

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Database is not connected")]
    NotConnected,

    #[error("Index creation failed: {0}")]
    Index(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Stored document is malformed: {0}")]
    Corrupt(String),
}
