use blogify_types::PostId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("you must be logged in to do that")]
    NotLoggedIn,

    #[error("you do not have permission to modify post {0}")]
    PermissionDenied(PostId),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("post not found: {0}")]
    PostNotFound(PostId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Content(#[from] blogify_content::ContentError),

    #[error(transparent)]
    Session(#[from] blogify_session::SessionError),

    #[error("storage error: {0}")]
    Storage(#[from] blogify_storage::StorageError),
}

pub type SdkResult<T> = Result<T, SdkError>;
