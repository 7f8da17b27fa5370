//! Wires the editor, renderer and surface together.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::script::{Script, ScriptStep};
use doodlepad_core::storage::SceneStore;
use doodlepad_core::{Editor, EditorAction, EventOutcome, InputEvent, Redraw};
use doodlepad_render::{DisplayList, ExportImage, RenderContext, Renderer, SceneRenderer, Surface};
use peniko::Color;

/// One drawing session.
///
/// Each event is applied (and persisted by the editor) before it is drawn.
/// Until a surface is mounted, drawing is skipped and export yields nothing.
pub struct Session {
    editor: Editor,
    renderer: SceneRenderer,
    surface: Option<Surface>,
    background_color: Color,
}

impl Session {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            renderer: SceneRenderer::new(),
            surface: None,
            background_color: Color::WHITE,
        }
    }

    /// Open the saved drawing described by `config`.
    pub fn open(config: &AppConfig) -> AppResult<Self> {
        let store = SceneStore::with_key(config.storage()?, config.storage_key.clone());
        let editor = Editor::open(store)
            .with_state(config.editor_state())
            .with_viewport(config.viewport())
            .with_love_message(config.love.clone());
        Ok(Self::new(editor).with_background(config.background_color.into()))
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Commands of the last full repaint.
    pub fn display_list(&self) -> &DisplayList {
        self.renderer.display_list()
    }

    /// Create the surface at the editor's viewport and draw the scene.
    pub fn mount(&mut self) {
        self.surface = Some(Surface::new(*self.editor.viewport()));
        self.render();
    }

    /// Feed one input event through the editor and repaint as needed.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        let is_resize = matches!(event, InputEvent::Resize { .. });
        let outcome = self.editor.handle_event(event);
        if is_resize {
            if let Some(surface) = &mut self.surface {
                surface.resize(*self.editor.viewport());
            }
        }
        self.redraw(outcome.redraw);
        outcome
    }

    /// Apply a menu command and repaint as needed.
    pub fn apply(&mut self, action: EditorAction) -> EventOutcome {
        let outcome = self.editor.apply(action);
        self.redraw(outcome.redraw);
        outcome
    }

    /// Run every step of `script` in order.
    pub fn run_script(&mut self, script: &Script) {
        for step in &script.steps {
            match step {
                ScriptStep::Event(event) => {
                    self.handle_event(event.clone());
                }
                ScriptStep::Action(action) => {
                    self.apply(action.clone());
                }
                ScriptStep::Text { text } => {
                    for key in ScriptStep::typed_keys(text) {
                        self.handle_event(key);
                    }
                }
                ScriptStep::Wait { wait_ms } => {
                    for _ in 0..ScriptStep::ticks_for(*wait_ms) {
                        self.handle_event(InputEvent::Tick);
                    }
                }
            }
        }
        log::info!(
            "Replayed {} steps, drawing has {} entries",
            script.len(),
            self.editor.scene().len()
        );
    }

    fn redraw(&mut self, redraw: Redraw) {
        match redraw {
            Redraw::None => {}
            Redraw::Full => self.render(),
            Redraw::Segment {
                from,
                to,
                color,
                width,
            } => {
                if let Some(surface) = &mut self.surface {
                    surface.paint_segment(&DisplayList::segment(from, to, color.into(), width));
                }
            }
        }
    }

    /// Full replay of the scene and live overlay onto the surface.
    pub fn render(&mut self) {
        let Some(surface) = &mut self.surface else {
            return;
        };
        let ctx = RenderContext::for_editor(&self.editor).with_background(self.background_color);
        self.renderer.build_scene(&ctx);
        surface.present(self.renderer.display_list());
    }

    /// Raw pixels of the surface as currently shown.
    pub fn export_image(&self) -> Option<ExportImage> {
        self.surface.as_ref().map(Surface::snapshot)
    }

    /// PNG encoding of the surface as currently shown.
    pub fn current_surface_image(&self) -> Option<Vec<u8>> {
        let image = self.export_image()?;
        match image.to_png() {
            Ok(png) => {
                log::info!(
                    "Exported {}x{} image ({} bytes)",
                    image.width,
                    image.height,
                    png.len()
                );
                Some(png)
            }
            Err(e) => {
                log::error!("Failed to encode PNG: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("entries", &self.editor.scene().len())
            .field("mode", &self.editor.state().mode)
            .field("surface", &self.surface)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doodlepad_core::{InkColor, Scene};

    fn session() -> Session {
        Session::new(Editor::new(Scene::new()).with_rng_seed(7))
    }

    #[test]
    fn test_unmounted_session_draws_nothing() {
        let mut session = session();
        session.handle_event(InputEvent::down(0.0, 0.0));
        session.handle_event(InputEvent::moved(10.0, 0.0));
        session.handle_event(InputEvent::PointerUp);

        assert_eq!(session.editor().scene().len(), 1);
        assert!(session.display_list().is_empty());
        assert!(session.current_surface_image().is_none());
        assert!(session.export_image().is_none());
    }

    #[test]
    fn test_mount_renders_existing_scene() {
        let mut scene = Scene::new();
        scene.append(doodlepad_core::Entry::stroke(
            vec![kurbo::Point::new(0.0, 0.0), kurbo::Point::new(10.0, 0.0)],
            InkColor::RED,
            5.0,
        ));
        let mut session = Session::new(Editor::new(scene));
        session.mount();

        assert_eq!(session.display_list().len(), 2);
        let surface = session.surface().unwrap();
        assert_eq!(surface.pixel(5, 0), Some(InkColor::RED));
    }

    #[test]
    fn test_drag_paints_segments_before_commit() {
        let mut session = session();
        session.mount();
        session.handle_event(InputEvent::down(0.0, 20.0));
        session.handle_event(InputEvent::moved(30.0, 20.0));

        assert!(session.editor().scene().is_empty());
        assert_eq!(session.surface().unwrap().pixel(15, 20), Some(InkColor::BLACK));
    }

    #[test]
    fn test_resize_rebuilds_surface() {
        let mut session = session();
        session.mount();
        session.handle_event(InputEvent::Resize {
            size: kurbo::Size::new(200.0, 100.0),
            scale_factor: 2.0,
        });
        assert_eq!(session.surface().unwrap().pixel_size(), (400, 200));
        assert_eq!(session.surface().unwrap().pixel(399, 199), Some(InkColor::WHITE));
    }

    #[test]
    fn test_custom_background() {
        let mut session = session().with_background(InkColor::GOLD.into());
        session.mount();
        assert_eq!(session.surface().unwrap().pixel(0, 0), Some(InkColor::GOLD));
    }

    #[test]
    fn test_png_export() {
        let mut session = session();
        session.mount();
        let png = session.current_surface_image().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
