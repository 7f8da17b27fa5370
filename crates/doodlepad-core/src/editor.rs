//! The editing session: routes input through the active mode into the scene.

use crate::input::{InputEvent, Key};
use crate::scene::{Entry, Scene};
use crate::shapes::{InkColor, LoveMessage, ShapeKind, love_hearts};
use crate::storage::SceneStore;
use crate::tools::{EditorAction, EditorState, Mode};
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Vertical offset of the declaration text from the surface center.
const LOVE_DECLARATION_OFFSET: f64 = -30.0;
const LOVE_DECLARATION_SIZE: f64 = 48.0;
/// Vertical offset of the name text from the surface center.
const LOVE_NAME_OFFSET: f64 = 20.0;
const LOVE_NAME_SIZE: f64 = 32.0;

/// What the host has to repaint after an event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Redraw {
    #[default]
    None,
    /// Replay the whole scene plus any live overlay.
    Full,
    /// Paint a single new stroke segment over the current frame.
    Segment {
        from: Point,
        to: Point,
        color: InkColor,
        width: f64,
    },
}

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EventOutcome {
    pub redraw: Redraw,
    /// The host should suppress the event's default effect.
    pub prevent_default: bool,
}

impl EventOutcome {
    fn none() -> Self {
        Self::default()
    }

    fn full() -> Self {
        Self {
            redraw: Redraw::Full,
            prevent_default: false,
        }
    }

    fn consumed(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}

/// Single-writer owner of the scene.
///
/// Every committed mutation is persisted before the outcome asking for a
/// repaint is returned, so a repaint never shows unsaved state.
pub struct Editor {
    scene: Scene,
    state: EditorState,
    viewport: Viewport,
    store: Option<SceneStore>,
    love: LoveMessage,
    rng: StdRng,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Scene::new())
    }
}

impl Editor {
    /// Create an editor over `scene` without persistence.
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            state: EditorState::new(),
            viewport: Viewport::default(),
            store: None,
            love: LoveMessage::default(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an editor over the drawing saved in `store`.
    pub fn open(store: SceneStore) -> Self {
        let scene = store.load();
        log::info!("Loaded drawing with {} entries", scene.len());
        let mut editor = Self::new(scene);
        editor.store = Some(store);
        editor
    }

    pub fn with_state(mut self, state: EditorState) -> Self {
        self.state = state;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_love_message(mut self, love: LoveMessage) -> Self {
        self.love = love;
        self
    }

    /// Seed the random source used by the love macro.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn store(&self) -> Option<&SceneStore> {
        self.store.as_ref()
    }

    /// Handle one input event.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        if let Some(position) = event.position() {
            if !position.is_finite() {
                log::debug!("Ignoring pointer event at non-finite {:?}", position);
                return EventOutcome::none();
            }
        }
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp | InputEvent::PointerLeave => self.pointer_up(),
            InputEvent::Key { key } => self.key(key),
            InputEvent::Tick => self.tick(),
            InputEvent::Resize { size, scale_factor } => {
                self.viewport = Viewport::new(size, scale_factor);
                log::info!(
                    "Viewport {}x{} @ {}x",
                    self.viewport.size.width,
                    self.viewport.size.height,
                    self.viewport.scale_factor
                );
                EventOutcome::full()
            }
        }
    }

    /// Apply a menu or button command.
    pub fn apply(&mut self, action: EditorAction) -> EventOutcome {
        match action {
            EditorAction::SelectFreehand => self.select_mode(Mode::Freehand),
            EditorAction::ToggleText => self.select_mode(self.state.toggled(Mode::Text)),
            EditorAction::ToggleEraser => self.select_mode(self.state.toggled(Mode::Eraser)),
            EditorAction::ToggleShape(kind) => {
                self.select_mode(self.state.toggled(Mode::ShapeStamp(kind)))
            }
            EditorAction::SetColor(color) => {
                self.state.color = color;
                if self.state.mode == Mode::Eraser {
                    self.state.mode = Mode::Freehand;
                }
                self.overlay_outcome()
            }
            EditorAction::SetBrushSize(size) => {
                self.state.set_brush_size(size);
                self.overlay_outcome()
            }
            EditorAction::DeclareLove => {
                self.declare_love();
                EventOutcome::full()
            }
            EditorAction::Clear => {
                self.scene.clear();
                log::info!("Cleared drawing");
                self.persist();
                EventOutcome::full()
            }
        }
    }

    /// Commit the pending text, if any, then switch to `target`.
    fn select_mode(&mut self, target: Mode) -> EventOutcome {
        let had_text = self.state.is_editing_text();
        if had_text {
            self.commit_text();
        }
        log::debug!("Mode {:?} -> {:?}", self.state.mode, target);
        self.state.mode = target;
        if had_text {
            EventOutcome::full()
        } else {
            EventOutcome::none()
        }
    }

    /// Full repaint only when the live overlay depends on what changed.
    fn overlay_outcome(&self) -> EventOutcome {
        if self.state.is_editing_text() {
            EventOutcome::full()
        } else {
            EventOutcome::none()
        }
    }

    fn pointer_down(&mut self, position: Point) -> EventOutcome {
        if self.state.is_editing_text() {
            self.commit_text();
            return EventOutcome::full().consumed();
        }

        match self.state.mode {
            Mode::Freehand | Mode::Eraser => {
                self.state.begin_stroke(position);
                EventOutcome::none().consumed()
            }
            Mode::ShapeStamp(kind) => {
                self.stamp(kind, position);
                EventOutcome::full().consumed()
            }
            Mode::Text => {
                self.state.begin_text(position);
                EventOutcome::full().consumed()
            }
        }
    }

    fn pointer_move(&mut self, position: Point) -> EventOutcome {
        if !self.state.mode.draws_strokes() {
            return EventOutcome::none();
        }
        let color = self.state.stroke_color();
        let width = self.state.brush_size();
        match self.state.extend_stroke(position) {
            Some((from, to)) => EventOutcome {
                redraw: Redraw::Segment {
                    from,
                    to,
                    color,
                    width,
                },
                prevent_default: true,
            },
            None => EventOutcome::none(),
        }
    }

    fn pointer_up(&mut self) -> EventOutcome {
        let Some(points) = self.state.take_stroke() else {
            return EventOutcome::none();
        };
        let entry = Entry::stroke(points, self.state.stroke_color(), self.state.brush_size());
        if self.commit(entry) {
            EventOutcome::full()
        } else {
            EventOutcome::none()
        }
    }

    fn key(&mut self, key: Key) -> EventOutcome {
        let Some(pending) = self.state.pending_text_mut() else {
            return EventOutcome::none();
        };

        let outcome = match key {
            Key::Enter => {
                self.commit_text();
                EventOutcome::full()
            }
            Key::Backspace | Key::Delete => {
                pending.pop();
                EventOutcome::full()
            }
            ref other => match other.typed_char() {
                Some(c) => {
                    pending.push(c);
                    EventOutcome::full()
                }
                None => EventOutcome::none(),
            },
        };
        outcome.consumed()
    }

    fn tick(&mut self) -> EventOutcome {
        match self.state.pending_text_mut() {
            Some(pending) => {
                pending.toggle_caret();
                EventOutcome::full()
            }
            None => EventOutcome::none(),
        }
    }

    fn stamp(&mut self, kind: ShapeKind, anchor: Point) {
        let entry = Entry::shape(kind, anchor, self.state.stamp_size(), self.state.color);
        self.commit(entry);
    }

    /// End text entry. Blank text is dropped; either way text mode is left.
    fn commit_text(&mut self) {
        let Some(pending) = self.state.take_text() else {
            return;
        };
        self.state.mode = Mode::Freehand;

        if pending.is_blank() {
            log::debug!("Discarded blank text");
            return;
        }
        let entry = Entry::text(
            pending.anchor,
            pending.buffer,
            self.state.color,
            self.state.text_size(),
        );
        self.commit(entry);
    }

    fn declare_love(&mut self) {
        let center = self.viewport.center();
        for (anchor, size) in love_hearts(center, &mut self.rng) {
            self.scene
                .append(Entry::shape(ShapeKind::Heart, anchor, size, InkColor::RED));
        }
        self.scene.append(Entry::centered_text(
            center + Vec2::new(0.0, LOVE_DECLARATION_OFFSET),
            self.love.declaration.clone(),
            InkColor::DEEP_PINK,
            LOVE_DECLARATION_SIZE,
        ));
        self.scene.append(Entry::centered_text(
            center + Vec2::new(0.0, LOVE_NAME_OFFSET),
            self.love.name.clone(),
            InkColor::HOT_PINK,
            LOVE_NAME_SIZE,
        ));
        self.persist();
    }

    /// Append and persist. Returns whether the entry was stored.
    fn commit(&mut self, entry: Entry) -> bool {
        if !self.scene.append(entry) {
            return false;
        }
        self.persist();
        true
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.scene) {
                log::error!("Failed to save drawing: {}", e);
            }
        }
    }
}
