//! Renderer trait abstraction.

use doodlepad_core::{Editor, EditorState, InkColor, PendingText, Scene};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Uncommitted text drawn over the scene while it is being typed.
#[derive(Debug, Clone, Copy)]
pub struct LiveOverlay<'a> {
    pub text: &'a PendingText,
    pub color: InkColor,
    pub font_size: f64,
}

impl<'a> LiveOverlay<'a> {
    /// The overlay for `state`, if text is being edited.
    pub fn from_state(state: &'a EditorState) -> Option<Self> {
        state.pending_text().map(|text| Self {
            text,
            color: state.color,
            font_size: state.text_size(),
        })
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The committed drawing.
    pub scene: &'a Scene,
    /// Pending text and caret, if any.
    pub overlay: Option<LiveOverlay<'a>>,
    /// Background color.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            overlay: None,
            background_color: Color::WHITE,
        }
    }

    /// Context for the editor's scene and its live text overlay.
    pub fn for_editor(editor: &'a Editor) -> Self {
        Self::new(editor.scene()).with_overlay(LiveOverlay::from_state(editor.state()))
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the live overlay.
    pub fn with_overlay(mut self, overlay: Option<LiveOverlay<'a>>) -> Self {
        self.overlay = overlay;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the draw commands for a frame.
    ///
    /// Called for every full repaint; must not depend on earlier frames.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
