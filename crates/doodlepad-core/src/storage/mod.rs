//! Storage abstraction for persistence.

mod file;
mod memory;
mod scene_store;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use scene_store::{DEFAULT_SCENE_KEY, SceneStore};

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value store for serialized drawings.
///
/// Values are opaque strings; callers own the encoding. Implementations can
/// keep them in memory or on the filesystem.
pub trait Storage: Send + Sync {
    /// Store `blob` under `key`, replacing any previous value.
    fn save(&self, key: &str, blob: &str) -> StorageResult<()>;

    /// Fetch the value under `key`. Missing keys are `StorageError::NotFound`.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all stored keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}
