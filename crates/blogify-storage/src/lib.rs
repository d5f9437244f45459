//! Key-value record storage for Blogify.
//!
//! Blogify keeps its state in a handful of named records, each holding a
//! serialized snapshot. This crate provides the storage interface those
//! records live behind, analogous to a browser's `localStorage`.
//!
//! # Storage Backends
//!
//! All backends implement the [`Storage`] trait:
//!
//! - [`InMemoryStorage`] -- `HashMap`-based store for tests and embedding
//! - [`FileStorage`] -- one file per key inside a data directory
//!
//! # Design Rules
//!
//! 1. Writes replace the whole value; there are no partial updates.
//! 2. A reader never observes a half-written value.
//! 3. The store never interprets values -- they are opaque strings.
//! 4. There is no cross-process coordination: the last writer wins.

pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use keys::validate_key;
pub use memory::InMemoryStorage;
pub use traits::Storage;
