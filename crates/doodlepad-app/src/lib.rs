//! Doodlepad Application
//!
//! Headless application shell: configuration, the drawing session that
//! routes input through the editor to the surface, and scripted replay.

mod config;
mod error;
mod script;
mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use script::{Script, ScriptStep};
pub use session::Session;
