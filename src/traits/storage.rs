//! Durable key-value storage trait abstraction.
//!
//! The session is persisted as a handful of string entries under fixed keys,
//! so the storage seam is a plain synchronous key-value store. Production
//! uses a JSON file; tests use an in-memory map.

use std::fmt;

/// Storage operation errors.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Failed to read or write the backing file
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Other error
    Other(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "Storage IO error: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Storage serialization error: {}", msg),
            StorageError::Other(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Trait for synchronous, process-local, durable key-value storage.
///
/// `set_many` and `remove_many` must apply all entries as one update: a
/// concurrent `get` observes either none or all of them. The default
/// implementations loop and are only suitable for stores without readers on
/// other threads.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Absent keys return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Write several values as one update.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Delete several values as one update.
    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        assert_eq!(
            StorageError::Io("disk full".to_string()).to_string(),
            "Storage IO error: disk full"
        );
        assert_eq!(
            StorageError::Serialization("invalid json".to_string()).to_string(),
            "Storage serialization error: invalid json"
        );
        assert_eq!(
            StorageError::Other("unknown".to_string()).to_string(),
            "Storage error: unknown"
        );
    }

    #[test]
    fn test_storage_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_storage_error_implements_error_trait() {
        let err = StorageError::Other("x".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
