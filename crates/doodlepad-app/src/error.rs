//! Application errors.

use doodlepad_core::storage::StorageError;
use doodlepad_render::RendererError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("No surface to export")]
    NoSurface,
}

pub type AppResult<T> = Result<T, AppError>;
