/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key cannot be used as a record name.
    #[error("invalid storage key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// I/O error from the underlying backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value is not valid UTF-8.
    #[error("record {key:?} is not valid UTF-8")]
    NotUtf8 { key: String },

    /// A lock guarding in-memory state was poisoned.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
