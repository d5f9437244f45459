//! Client-side content store for Blogify.
//!
//! The [`ContentStore`] owns the full collection of posts. Every mutation is
//! applied to a working copy, written through to [`Storage`] as one JSON
//! record, and only then published as the new [`Snapshot`]. On first run (or
//! when the record is missing or unparsable) the store starts from the fixed
//! [seed dataset](seed::seed_posts).
//!
//! # Modules
//!
//! - [`draft`]: Typed [`PostDraft`] / [`PostPatch`] with explicit validation
//! - [`store`]: The [`ContentStore`] and its [`Snapshot`]s
//! - [`views`]: Pure derived views: search, filters, orderings, grouping
//! - [`memo`]: [`MemoizedView`], a query cache keyed on snapshot identity
//! - [`seed`]: The seed dataset
//!
//! [`Storage`]: blogify_storage::Storage

pub mod draft;
pub mod error;
pub mod memo;
pub mod seed;
pub mod store;
pub mod views;

pub use draft::{parse_tags, Field, FieldError, PostDraft, PostPatch, ValidDraft, ValidationErrors};
pub use error::{ContentError, ContentResult};
pub use memo::MemoizedView;
pub use seed::seed_posts;
pub use store::{decode_posts, ContentStore, Snapshot, DEFAULT_POSTS_KEY};
pub use views::{FeaturedPartition, PostQuery};
