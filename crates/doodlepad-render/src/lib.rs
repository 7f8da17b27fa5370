//! Doodlepad Render Library
//!
//! Renderer abstraction, the replaying scene renderer and a CPU raster
//! surface. Frames are built as backend-independent display lists and
//! rasterized with `vello_cpu`.

mod display_list;
mod renderer;
mod scene_renderer;
mod surface;
pub mod text;

pub use display_list::{DisplayList, DrawCommand};
pub use renderer::{LiveOverlay, RenderContext, RenderResult, Renderer, RendererError};
pub use scene_renderer::{CARET_WIDTH, SceneRenderer, caret_rect};
pub use surface::{ExportImage, Surface};
pub use text::TextLayout;
