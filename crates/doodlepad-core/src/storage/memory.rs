//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, blob: &str) -> StorageResult<()> {
        let mut blobs = self.blobs.write().map_err(lock_error)?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> StorageResult<String> {
        let blobs = self.blobs.read().map_err(lock_error)?;
        blobs
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut blobs = self.blobs.write().map_err(lock_error)?;
        blobs.remove(key);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let blobs = self.blobs.read().map_err(lock_error)?;
        Ok(blobs.keys().cloned().collect())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let blobs = self.blobs.read().map_err(lock_error)?;
        Ok(blobs.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_save_load() {
        let storage = MemoryStorage::new();
        storage.save("drawing", "{\"entries\":[]}").unwrap();
        assert_eq!(storage.load("drawing").unwrap(), "{\"entries\":[]}");
    }

    #[test]
    fn test_memory_storage_overwrite() {
        let storage = MemoryStorage::new();
        storage.save("drawing", "a").unwrap();
        storage.save("drawing", "b").unwrap();
        assert_eq!(storage.load("drawing").unwrap(), "b");
        assert_eq!(storage.list().unwrap().len(), 1);
    }

    #[test]
    fn test_memory_storage_not_found() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.load("missing"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_memory_storage_delete() {
        let storage = MemoryStorage::new();
        storage.save("drawing", "x").unwrap();
        assert!(storage.exists("drawing").unwrap());
        storage.delete("drawing").unwrap();
        assert!(!storage.exists("drawing").unwrap());
        storage.delete("drawing").unwrap();
    }
}
