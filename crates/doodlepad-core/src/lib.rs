//! Doodlepad Core Library
//!
//! Platform-agnostic drawing model: stamp geometry, the append-only scene,
//! the input-mode state machine and persistence.

pub mod editor;
pub mod input;
pub mod scene;
pub mod shapes;
pub mod storage;
pub mod tools;
pub mod viewport;

pub use editor::{Editor, EventOutcome, Redraw};
pub use input::{InputEvent, Key};
pub use scene::{Entry, Scene, SceneError, ShapeEntry, StrokeEntry, TextAlign, TextEntry};
pub use shapes::{InkColor, Primitive, ShapeKind};
pub use tools::{EditorAction, EditorState, Mode, PendingText};
pub use viewport::Viewport;
