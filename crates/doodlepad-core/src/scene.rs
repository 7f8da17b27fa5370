//! The committed drawing and its serialized form.

use crate::shapes::{InkColor, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Texts that older drawings centered on their anchor.
const LEGACY_CENTERED_TEXTS: [&str; 2] = ["TE AMO", "ISABELA LUETKEMEYER"];

/// Brush size assumed for legacy paths that omit `size`.
const LEGACY_DEFAULT_SIZE: f64 = 5.0;

/// Legacy boolean flags and the shape each one selects, in precedence order.
const LEGACY_SHAPE_FLAGS: [(&str, ShapeKind); 8] = [
    ("isHeart", ShapeKind::Heart),
    ("isStar", ShapeKind::Star),
    ("isCircle", ShapeKind::Circle),
    ("isSquare", ShapeKind::Square),
    ("isTriangle", ShapeKind::Triangle),
    ("isFlower", ShapeKind::Flower),
    ("isSmiley", ShapeKind::Smiley),
    ("isButterfly", ShapeKind::Butterfly),
];

/// Scene loading errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unrecognized drawing format: {0}")]
    Format(String),
}

/// A freehand polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeEntry {
    pub points: Vec<Point>,
    pub color: InkColor,
    pub width: f64,
}

/// Horizontal placement of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Anchor is the left end of the baseline.
    #[default]
    Left,
    /// Anchor is the middle of the baseline.
    Center,
}

/// A single line of text. `anchor` is on the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEntry {
    pub anchor: Point,
    pub color: InkColor,
    pub font_size: f64,
    pub text: String,
    #[serde(default)]
    pub align: TextAlign,
}

/// A stamped shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeEntry {
    pub anchor: Point,
    pub color: InkColor,
    pub size: f64,
    pub kind: ShapeKind,
}

/// One committed drawable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    Stroke(StrokeEntry),
    Text(TextEntry),
    Shape(ShapeEntry),
}

impl Entry {
    /// A freehand polyline.
    pub fn stroke(points: Vec<Point>, color: InkColor, width: f64) -> Self {
        Entry::Stroke(StrokeEntry { points, color, width })
    }

    /// Left-aligned text with its baseline starting at `anchor`.
    pub fn text(anchor: Point, text: impl Into<String>, color: InkColor, font_size: f64) -> Self {
        Entry::Text(TextEntry {
            anchor,
            color,
            font_size,
            text: text.into(),
            align: TextAlign::Left,
        })
    }

    /// Text centered horizontally on `anchor`.
    pub fn centered_text(
        anchor: Point,
        text: impl Into<String>,
        color: InkColor,
        font_size: f64,
    ) -> Self {
        Entry::Text(TextEntry {
            anchor,
            color,
            font_size,
            text: text.into(),
            align: TextAlign::Center,
        })
    }

    /// A stamped shape.
    pub fn shape(kind: ShapeKind, anchor: Point, size: f64, color: InkColor) -> Self {
        Entry::Shape(ShapeEntry {
            anchor,
            color,
            size,
            kind,
        })
    }

    /// Ink color of the entry.
    pub fn color(&self) -> InkColor {
        match self {
            Entry::Stroke(s) => s.color,
            Entry::Text(t) => t.color,
            Entry::Shape(s) => s.color,
        }
    }

    /// Whether the entry satisfies the scene's storage rules: strokes need
    /// two points, and every coordinate and size must be finite.
    pub fn is_committable(&self) -> bool {
        match self {
            Entry::Stroke(s) => {
                s.points.len() >= 2 && s.width.is_finite() && s.points.iter().all(|p| p.is_finite())
            }
            Entry::Text(t) => t.anchor.is_finite() && t.font_size.is_finite(),
            Entry::Shape(s) => s.anchor.is_finite() && s.size.is_finite(),
        }
    }
}

/// Ordered list of committed entries. Insertion order is paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    entries: Vec<Entry>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the end of the scene.
    ///
    /// Entries failing [`Entry::is_committable`] (such as strokes with
    /// fewer than two points) are rejected and `false` is returned;
    /// nothing is stored in that case.
    pub fn append(&mut self, entry: Entry) -> bool {
        if !entry.is_committable() {
            log::debug!("Rejected degenerate entry");
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries in paint order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate entries in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the scene has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to the `{"entries": [...]}` form.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a serialized scene.
    ///
    /// Accepts the current `{"entries": [...]}` form as well as the older
    /// `{"paths": [...]}` form written by earlier versions of the app.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let value: Value = serde_json::from_str(json)?;
        if value.get("entries").is_none() && value.get("paths").is_some() {
            return Self::from_legacy(&value);
        }
        let stored: Scene = serde_json::from_value(value)?;
        Ok(stored.entries.into_iter().collect())
    }

    /// Parse `json`, falling back to an empty scene when it is absent or
    /// unreadable.
    pub fn load_or_empty(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            None => Self::new(),
            Some(Ok(scene)) => scene,
            Some(Err(e)) => {
                log::warn!("Discarding unreadable drawing: {}", e);
                Self::new()
            }
        }
    }

    fn from_legacy(value: &Value) -> Result<Self, SceneError> {
        let paths = value
            .get("paths")
            .and_then(|p| p.as_array())
            .ok_or_else(|| SceneError::Format("'paths' is not an array".to_string()))?;

        let mut scene = Self::new();
        for path in paths {
            let points: Vec<Point> = path
                .get("points")
                .and_then(|p| p.as_array())
                .map(|pts| {
                    pts.iter()
                        .filter_map(|p| {
                            Some(Point::new(p.get("x")?.as_f64()?, p.get("y")?.as_f64()?))
                        })
                        .collect()
                })
                .unwrap_or_default();
            let color = path
                .get("color")
                .and_then(|c| c.as_str())
                .and_then(|c| InkColor::from_hex(c).ok())
                .unwrap_or_default();
            let size = path
                .get("size")
                .and_then(|s| s.as_f64())
                .unwrap_or(LEGACY_DEFAULT_SIZE);

            let Some(&anchor) = points.first() else {
                log::debug!("Skipping legacy path without points");
                continue;
            };

            let entry = if let Some(text) = path
                .get("text")
                .and_then(|t| t.as_str())
                .filter(|t| !t.is_empty())
            {
                if LEGACY_CENTERED_TEXTS.contains(&text) {
                    Entry::centered_text(anchor, text, color, size)
                } else {
                    Entry::text(anchor, text, color, size)
                }
            } else if let Some(kind) = legacy_shape_kind(path) {
                Entry::shape(kind, anchor, size, color)
            } else {
                Entry::stroke(points, color, size)
            };
            scene.append(entry);
        }

        log::info!("Imported {} entries from legacy drawing", scene.len());
        Ok(scene)
    }
}

fn legacy_shape_kind(path: &Value) -> Option<ShapeKind> {
    LEGACY_SHAPE_FLAGS
        .iter()
        .find(|(flag, _)| path.get(*flag).and_then(|v| v.as_bool()).unwrap_or(false))
        .map(|(_, kind)| *kind)
}

impl FromIterator<Entry> for Scene {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut scene = Self::new();
        scene.extend(iter);
        scene
    }
}

impl Extend<Entry> for Scene {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.append(entry);
        }
    }
}
