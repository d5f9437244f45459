use crate::error::StorageResult;

/// String-keyed record storage with whole-value replace semantics.
///
/// All implementations must satisfy these invariants:
/// - `set` fully overwrites any previous value under the key.
/// - A concurrent or subsequent `get` sees either the old or the new value,
///   never a mix of both.
/// - `remove` of an absent key is not an error.
/// - Keys are validated with [`validate_key`](crate::validate_key) before use.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written or was removed.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value under `key`. Returns `true` if a value existed.
    fn remove(&self, key: &str) -> StorageResult<bool>;

    /// Check whether a value exists under `key`.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
