//! Drawing modes and the editor's tool state.

use crate::shapes::{InkColor, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Colors offered by the host palette.
pub const PALETTE: [InkColor; 20] = [
    InkColor::rgb(0x00, 0x00, 0x00),
    InkColor::rgb(0xFF, 0x00, 0x00),
    InkColor::rgb(0x00, 0xFF, 0x00),
    InkColor::rgb(0x00, 0x00, 0xFF),
    InkColor::rgb(0xFF, 0xFF, 0x00),
    InkColor::rgb(0xFF, 0x00, 0xFF),
    InkColor::rgb(0x00, 0xFF, 0xFF),
    InkColor::rgb(0xFF, 0xA5, 0x00),
    InkColor::rgb(0x80, 0x00, 0x80),
    InkColor::rgb(0xFF, 0xC0, 0xCB),
    InkColor::rgb(0xA5, 0x2A, 0x2A),
    InkColor::rgb(0x80, 0x80, 0x80),
    InkColor::rgb(0xFF, 0xB6, 0xC1),
    InkColor::rgb(0x98, 0xFB, 0x98),
    InkColor::rgb(0x87, 0xCE, 0xEB),
    InkColor::rgb(0xDD, 0xA0, 0xDD),
    InkColor::rgb(0xF0, 0xE6, 0x8C),
    InkColor::rgb(0xFF, 0x63, 0x47),
    InkColor::rgb(0x40, 0xE0, 0xD0),
    InkColor::rgb(0xEE, 0x82, 0xEE),
];

/// Brush sizes offered by the host.
pub const BRUSH_SIZES: [f64; 5] = [2.0, 5.0, 10.0, 15.0, 20.0];

pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;

/// Background color; eraser strokes are committed in it.
pub const BACKGROUND_COLOR: InkColor = InkColor::WHITE;

/// Stamped shapes are this many times the brush size.
pub const STAMP_SCALE: f64 = 3.0;

/// Typed text is this many times the brush size.
pub const TEXT_SCALE: f64 = 4.0;

/// Half period of the text caret blink.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Active input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Freehand,
    Eraser,
    ShapeStamp(ShapeKind),
    Text,
}

impl Mode {
    /// Whether pointer drags in this mode draw strokes.
    pub fn draws_strokes(&self) -> bool {
        matches!(self, Mode::Freehand | Mode::Eraser)
    }
}

/// Text being typed but not yet committed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingText {
    /// Baseline origin of the text.
    pub anchor: Point,
    pub buffer: String,
    pub caret_visible: bool,
}

impl PendingText {
    /// Empty buffer at `anchor`, caret shown.
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            buffer: String::new(),
            caret_visible: true,
        }
    }

    /// Append a typed character.
    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character, if any.
    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    /// Flip the caret blink phase.
    pub fn toggle_caret(&mut self) {
        self.caret_visible = !self.caret_visible;
    }

    /// True when the buffer holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }
}

/// Transient pointer/keyboard interaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// A stroke is being dragged.
    Drawing { points: Vec<Point> },
    /// Text is being typed.
    EditingText(PendingText),
}

/// Commands issued by the host's menus and buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum EditorAction {
    /// Return to the brush.
    SelectFreehand,
    /// Enter text mode, or leave it when already active.
    ToggleText,
    /// Enter eraser mode, or leave it when already active.
    ToggleEraser,
    /// Arm a stamp, or disarm it when the same kind is already armed.
    ToggleShape(ShapeKind),
    /// Change the active color. Leaves eraser mode.
    SetColor(InkColor),
    SetBrushSize(f64),
    /// Place the heart-curve composite at the surface center.
    DeclareLove,
    /// Remove every entry.
    Clear,
}

/// Active color, brush and mode plus any in-flight interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub mode: Mode,
    pub color: InkColor,
    /// Surface color; the eraser paints with it.
    pub background: InkColor,
    brush_size: f64,
    interaction: Interaction,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            color: InkColor::BLACK,
            background: BACKGROUND_COLOR,
            brush_size: DEFAULT_BRUSH_SIZE,
            interaction: Interaction::Idle,
        }
    }
}

impl EditorState {
    /// Freehand mode, black ink, default brush.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active color.
    pub fn with_color(mut self, color: InkColor) -> Self {
        self.color = color;
        self
    }

    /// Set the surface color the eraser paints with.
    pub fn with_background(mut self, color: InkColor) -> Self {
        self.background = color;
        self
    }

    /// Set the brush size; invalid sizes keep the default.
    pub fn with_brush_size(mut self, size: f64) -> Self {
        self.set_brush_size(size);
        self
    }

    /// Stroke width in logical pixels.
    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    /// Set the brush size. Non-positive or non-finite sizes are ignored.
    pub fn set_brush_size(&mut self, size: f64) -> bool {
        if size.is_finite() && size > 0.0 {
            self.brush_size = size;
            true
        } else {
            log::warn!("Ignoring invalid brush size {}", size);
            false
        }
    }

    /// Color a stroke is committed with in the current mode.
    pub fn stroke_color(&self) -> InkColor {
        match self.mode {
            Mode::Eraser => self.background,
            _ => self.color,
        }
    }

    /// Size a stamp placed now would get.
    pub fn stamp_size(&self) -> f64 {
        self.brush_size * STAMP_SCALE
    }

    /// Font size text committed now would get.
    pub fn text_size(&self) -> f64 {
        self.brush_size * TEXT_SCALE
    }

    /// Mode reached by selecting `target` from the current mode.
    ///
    /// Selecting the mode that is already active returns to freehand.
    pub fn toggled(&self, target: Mode) -> Mode {
        if self.mode == target {
            Mode::Freehand
        } else {
            target
        }
    }

    /// The in-flight interaction.
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// A stroke is being dragged.
    pub fn is_drawing(&self) -> bool {
        matches!(self.interaction, Interaction::Drawing { .. })
    }

    /// Text is being typed.
    pub fn is_editing_text(&self) -> bool {
        matches!(self.interaction, Interaction::EditingText(_))
    }

    /// Text being typed, if any.
    pub fn pending_text(&self) -> Option<&PendingText> {
        match &self.interaction {
            Interaction::EditingText(pending) => Some(pending),
            _ => None,
        }
    }

    /// Mutable access to the text being typed.
    pub fn pending_text_mut(&mut self) -> Option<&mut PendingText> {
        match &mut self.interaction {
            Interaction::EditingText(pending) => Some(pending),
            _ => None,
        }
    }

    /// Points of the stroke being dragged.
    pub fn stroke_points(&self) -> &[Point] {
        match &self.interaction {
            Interaction::Drawing { points } => points,
            _ => &[],
        }
    }

    /// Start a stroke at `point`, dropping any other interaction.
    pub fn begin_stroke(&mut self, point: Point) {
        self.interaction = Interaction::Drawing {
            points: vec![point],
        };
    }

    /// Add a point to the stroke being dragged.
    ///
    /// Returns the newest segment, or `None` when no stroke is in progress.
    pub fn extend_stroke(&mut self, point: Point) -> Option<(Point, Point)> {
        match &mut self.interaction {
            Interaction::Drawing { points } => {
                let last = points.last().copied();
                points.push(point);
                last.map(|from| (from, point))
            }
            _ => None,
        }
    }

    /// Finish the stroke being dragged and hand back its points.
    pub fn take_stroke(&mut self) -> Option<Vec<Point>> {
        match std::mem::take(&mut self.interaction) {
            Interaction::Drawing { points } => Some(points),
            other => {
                self.interaction = other;
                None
            }
        }
    }

    /// Start typing at `anchor`.
    pub fn begin_text(&mut self, anchor: Point) {
        self.interaction = Interaction::EditingText(PendingText::new(anchor));
    }

    /// Stop editing text and hand back what was typed.
    pub fn take_text(&mut self) -> Option<PendingText> {
        match std::mem::take(&mut self.interaction) {
            Interaction::EditingText(pending) => Some(pending),
            other => {
                self.interaction = other;
                None
            }
        }
    }
}
