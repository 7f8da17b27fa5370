//! Application configuration.

use crate::error::{AppError, AppResult};
use doodlepad_core::shapes::LoveMessage;
use doodlepad_core::storage::{DEFAULT_SCENE_KEY, FileStorage, Storage};
use doodlepad_core::tools::{BACKGROUND_COLOR, DEFAULT_BRUSH_SIZE};
use doodlepad_core::{EditorState, InkColor, Viewport};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Surface size in logical pixels.
    pub width: u32,
    pub height: u32,
    pub scale_factor: f64,
    pub background_color: InkColor,
    /// Where drawings are saved; the platform data dir when unset.
    pub storage_dir: Option<PathBuf>,
    pub storage_key: String,
    pub default_color: InkColor,
    pub default_brush_size: f64,
    pub love: LoveMessage,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scale_factor: 1.0,
            background_color: BACKGROUND_COLOR,
            storage_dir: None,
            storage_key: DEFAULT_SCENE_KEY.to_string(),
            default_color: InkColor::BLACK,
            default_brush_size: DEFAULT_BRUSH_SIZE,
            love: LoveMessage::default(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. A missing file gives the defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&json).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            Size::new(self.width as f64, self.height as f64),
            self.scale_factor,
        )
    }

    /// Initial editor state: default color and brush, freehand mode.
    pub fn editor_state(&self) -> EditorState {
        EditorState::new()
            .with_color(self.default_color)
            .with_background(self.background_color)
            .with_brush_size(self.default_brush_size)
    }

    /// The storage backend drawings are kept in.
    pub fn storage(&self) -> AppResult<Arc<dyn Storage>> {
        let storage = match &self.storage_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::info!("Storing drawings in {}", storage.base_path().display());
        Ok(Arc::new(storage))
    }
}
