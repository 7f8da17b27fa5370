//! Persistence of the current drawing.

use crate::scene::Scene;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

/// Key the drawing is stored under unless configured otherwise.
pub const DEFAULT_SCENE_KEY: &str = "doodlepad-drawing";

/// Saves and restores the whole scene under a single key.
///
/// The scene is always written wholesale; there is no diffing.
#[derive(Clone)]
pub struct SceneStore {
    storage: Arc<dyn Storage>,
    key: String,
}

impl SceneStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_key(storage, DEFAULT_SCENE_KEY)
    }

    pub fn with_key(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the stored drawing with `scene`.
    pub fn save(&self, scene: &Scene) -> StorageResult<()> {
        let json = scene
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.save(&self.key, &json)
    }

    /// Load the stored drawing.
    ///
    /// A missing or unreadable drawing yields an empty scene.
    pub fn load(&self) -> Scene {
        match self.storage.load(&self.key) {
            Ok(json) => Scene::load_or_empty(Some(&json)),
            Err(StorageError::NotFound(_)) => {
                log::info!("No saved drawing under '{}'", self.key);
                Scene::new()
            }
            Err(e) => {
                log::warn!("Failed to read saved drawing: {}", e);
                Scene::new()
            }
        }
    }

    /// Remove the stored drawing.
    pub fn delete(&self) -> StorageResult<()> {
        self.storage.delete(&self.key)
    }
}

impl std::fmt::Debug for SceneStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneStore").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Entry;
    use crate::shapes::{InkColor, ShapeKind};
    use crate::storage::{FileStorage, MemoryStorage};
    use kurbo::Point;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load() {
        let store = SceneStore::new(Arc::new(MemoryStorage::new()));
        let mut scene = Scene::new();
        scene.append(Entry::shape(ShapeKind::Heart, Point::new(4.0, 4.0), 15.0, InkColor::RED));
        store.save(&scene).unwrap();
        assert_eq!(store.load(), scene);
    }

    #[test]
    fn test_missing_drawing_is_empty() {
        let store = SceneStore::new(Arc::new(MemoryStorage::new()));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_drawing_is_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.save(DEFAULT_SCENE_KEY, "{{{{").unwrap();
        let store = SceneStore::new(storage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_file_backed_store() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
        let store = SceneStore::with_key(storage, "mine");

        let mut scene = Scene::new();
        scene.append(Entry::text(Point::new(1.0, 2.0), "hi", InkColor::BLACK, 20.0));
        store.save(&scene).unwrap();

        assert!(dir.path().join("mine.json").exists());
        assert_eq!(store.load(), scene);

        store.delete().unwrap();
        assert!(store.load().is_empty());
    }
}
