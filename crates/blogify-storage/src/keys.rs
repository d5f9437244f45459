//! Storage key validation.
//!
//! Valid keys:
//! - Must be non-empty and at most 128 bytes
//! - May contain only ASCII letters, digits, `-`, `_` and `.`
//! - Must not start with `.`
//!
//! The rules keep a key usable verbatim as a file name by [`FileStorage`].
//!
//! [`FileStorage`]: crate::FileStorage

use crate::error::{StorageError, StorageResult};

/// Maximum key length in bytes.
pub const MAX_KEY_LEN: usize = 128;

/// Validate a storage key, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use blogify_storage::validate_key;
///
/// assert!(validate_key("blogify-blogs").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("../etc/passwd").is_err());
/// ```
pub fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = |reason: &str| StorageError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("key must not be empty"));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(invalid("key is too long"));
    }
    if key.starts_with('.') {
        return Err(invalid("must not start with '.'"));
    }
    if let Some(ch) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(invalid(&format!("contains forbidden character: {ch:?}")));
    }
    Ok(())
}
