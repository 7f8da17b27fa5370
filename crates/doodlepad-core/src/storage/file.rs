//! File-based storage implementation.

use super::{Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each key as a JSON file in a directory.
pub struct FileStorage {
    /// Base directory for stored drawings.
    base_path: PathBuf,
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io(format!("Failed to {} {}: {}", action, path.display(), e))
}

impl FileStorage {
    /// Open a directory of drawings, creating it if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&base_path).map_err(|e| io_error("create", &base_path, e))?;
        Ok(Self { base_path })
    }

    /// `doodlepad/` under the platform's local data dir
    /// (`~/.local/share` on Linux, `%LOCALAPPDATA%` on Windows).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("doodlepad"))
    }

    /// One file per key; anything outside `[A-Za-z0-9_-]` becomes `_`.
    fn blob_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| match c {
                c if c.is_alphanumeric() => c,
                '-' | '_' => c,
                _ => '_',
            })
            .chain(".json".chars())
            .collect();
        self.base_path.join(file_name)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, key: &str, blob: &str) -> StorageResult<()> {
        let path = self.blob_path(key);
        // Write then rename: readers never see a partial file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob).map_err(|e| io_error("write", &tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error("replace", &path, e))
    }

    fn load(&self, key: &str) -> StorageResult<String> {
        let path = self.blob_path(key);
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(blob),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.blob_path(key);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                Err(io_error("delete", &path, e))
            }
            _ => Ok(()),
        }
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let dir = fs::read_dir(&self.base_path).map_err(|e| io_error("list", &self.base_path, e))?;
        let mut keys: Vec<String> = dir
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.blob_path(key).is_file())
    }
}
