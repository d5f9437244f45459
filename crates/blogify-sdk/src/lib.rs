//! High-level SDK for Blogify.
//!
//! Wires the content and session stores over one storage backend and applies
//! the rules the user-facing client enforces on top of them: publishing
//! requires a login, editing and deleting require authorship or admin
//! rights, a post can be liked once per running session, and opening a post
//! counts a view. This is the main entry point for applications embedding
//! Blogify.

pub mod blogify;
pub mod config;
pub mod error;

pub use blogify::{can_edit, Blogify, HomeView, LikeOutcome};
pub use config::BlogifyConfig;
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use blogify_content::{
    parse_tags, ContentError, ContentStore, MemoizedView, PostDraft, PostPatch, PostQuery,
    Snapshot, ValidationErrors,
};
pub use blogify_session::SessionStore;
pub use blogify_storage::{FileStorage, InMemoryStorage, Storage};
pub use blogify_types::{Category, Post, PostId, Session};
