//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("player repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("player '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid player id '{0}': use 1-64 ASCII letters, digits, '-' or '_'")]
    InvalidId(String),
}
