//! Durable string-keyed storage.
//!
//! The checkout core persists exactly one entry (the cart) but talks to
//! storage through the [`KeyValueStore`] trait so tests can swap the file
//! store for an in-memory one.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors that can occur when reading or writing durable entries.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be mapped to a file name.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Value could not be encoded for storage.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string-keyed store of string values that survives restarts.
///
/// Methods take `&mut self` for writes: a store has a single owner, so no
/// locking is needed.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Keys are used as file names, so only a conservative alphabet is allowed.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cart").is_ok());
        assert!(validate_key("cart_v2-backup").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../cart").is_err());
        assert!(validate_key("a/b").is_err());
    }
}
