//! Foundation types for Blogify.
//!
//! This crate provides the data model shared by every other Blogify crate:
//! posts, their identifiers and categories, and the logged-in session. The
//! types are plain serde structs; the persisted JSON layout is exactly their
//! serialized form (camelCase field names, RFC 3339 timestamps).
//!
//! # Key Types
//!
//! - [`Post`]: A single blog entry with content, metadata, and counters
//! - [`PostId`]: Opaque, never-reused post identifier
//! - [`Category`]: The fixed set of post categories
//! - [`Session`]: The identity held by the client after login

pub mod category;
pub mod error;
pub mod post;
pub mod session;

pub use category::Category;
pub use error::TypeError;
pub use post::{Post, PostId};
pub use session::Session;
