use blogify_storage::StorageError;
use blogify_types::PostId;
use thiserror::Error;

use crate::draft::ValidationErrors;

/// Errors from content store operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A draft or patch failed validation. Nothing was mutated or written.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A replacement collection contains the same id twice.
    #[error("duplicate post id: {0}")]
    DuplicateId(PostId),

    /// The collection could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The underlying storage failed. The in-memory snapshot was not advanced.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<ValidationErrors> for ContentError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Result alias for content store operations.
pub type ContentResult<T> = Result<T, ContentError>;
