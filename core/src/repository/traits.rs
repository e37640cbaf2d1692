use crate::repository::error::StorageError;

/// A synchronous string-to-string medium, shaped like browser local storage.
///
/// `set` replaces the whole record. Implementations either complete a write
/// or return an error; there are no partial writes.
pub trait KeyValueStore {
    /// `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
