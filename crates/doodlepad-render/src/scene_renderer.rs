//! Full-replay renderer producing a display list.

use crate::display_list::{DisplayList, DrawCommand};
use crate::renderer::{LiveOverlay, RenderContext, Renderer};
use crate::text::TextLayout;
use doodlepad_core::shapes::{self, Primitive};
use doodlepad_core::{Entry, ShapeEntry, StrokeEntry, TextAlign, TextEntry};
use kurbo::{Point, Rect, Shape, Stroke};
use peniko::Color;

/// Width of the text caret in logical pixels.
pub const CARET_WIDTH: f64 = 2.0;
/// Caret top, as a fraction of the font size above the baseline.
const CARET_ASCENT: f64 = 0.75;

/// Replays a scene into a [`DisplayList`].
#[derive(Debug, Default)]
pub struct SceneRenderer {
    display_list: DisplayList,
    text: TextLayout,
}

impl SceneRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands built by the last [`Renderer::build_scene`].
    pub fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    /// Take ownership of the display list (leaves an empty one).
    pub fn take_display_list(&mut self) -> DisplayList {
        std::mem::take(&mut self.display_list)
    }

    pub fn text_layout(&self) -> &TextLayout {
        &self.text
    }

    fn render_entry(&mut self, entry: &Entry) {
        match entry {
            Entry::Stroke(stroke) => self.render_stroke(stroke),
            Entry::Text(text) => self.render_text(text),
            Entry::Shape(shape) => self.render_shape(shape),
        }
    }

    fn render_stroke(&mut self, stroke: &StrokeEntry) {
        self.display_list
            .stroke_polyline(&stroke.points, stroke.color.into(), stroke.width);
    }

    fn render_text(&mut self, text: &TextEntry) {
        let outline = self
            .text
            .layout(&text.text, text.anchor, text.font_size, text.align);
        if outline.elements().is_empty() {
            return;
        }
        self.display_list.push(DrawCommand::Text {
            outline,
            color: text.color.into(),
        });
    }

    fn render_shape(&mut self, shape: &ShapeEntry) {
        for primitive in shapes::stamp(shape.kind, shape.anchor, shape.size, shape.color) {
            let command = match primitive {
                Primitive::Fill { path, color } => DrawCommand::Fill {
                    path,
                    color: color.into(),
                },
                Primitive::Stroke { path, width, color } => DrawCommand::Stroke {
                    path,
                    stroke: Stroke::new(width),
                    color: color.into(),
                },
            };
            self.display_list.push(command);
        }
    }

    /// Pending text plus the caret when it is in its visible phase.
    fn render_overlay(&mut self, overlay: &LiveOverlay) {
        let pending = overlay.text;
        let color: Color = overlay.color.into();
        let outline = self.text.layout(
            &pending.buffer,
            pending.anchor,
            overlay.font_size,
            TextAlign::Left,
        );
        if !outline.elements().is_empty() {
            self.display_list.push(DrawCommand::Text { outline, color });
        }

        if pending.caret_visible {
            let caret = caret_rect(
                pending.anchor,
                self.text.measure(&pending.buffer, overlay.font_size),
                overlay.font_size,
            );
            self.display_list.push(DrawCommand::Fill {
                path: caret.to_path(shapes::PATH_TOLERANCE),
                color,
            });
        }
    }
}

/// Caret box after a run of `text_width` starting at `anchor`.
pub fn caret_rect(anchor: Point, text_width: f64, font_size: f64) -> Rect {
    let x = anchor.x + text_width;
    let y = anchor.y - CARET_ASCENT * font_size;
    Rect::new(x, y, x + CARET_WIDTH, y + font_size)
}

impl Renderer for SceneRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.display_list.clear();
        let background = self.background_color(ctx);
        self.display_list.push(DrawCommand::Clear { color: background });

        for entry in ctx.scene.iter() {
            self.render_entry(entry);
        }

        if let Some(overlay) = &ctx.overlay {
            self.render_overlay(overlay);
        }
        log::trace!(
            "Built {} draw commands for {} entries",
            self.display_list.len(),
            ctx.scene.len()
        );
    }
}
