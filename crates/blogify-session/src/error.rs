use blogify_storage::StorageError;
use thiserror::Error;

/// Errors from session store operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The underlying storage failed. The in-memory session was not changed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
