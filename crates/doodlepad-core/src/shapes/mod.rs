//! Stamp geometry and colors.
//!
//! Every stamp is a pure function of anchor, size and color that yields the
//! filled and stroked paths to draw, in painting order.

mod basic;
mod color;
mod decorative;
mod love;

pub use basic::{circle, heart, square, star, triangle};
pub use color::{ColorParseError, InkColor};
pub use decorative::{butterfly, flower, smiley};
pub use love::{
    LOVE_HEART_SIZES, LOVE_SAMPLES, LOVE_SCALE, LoveMessage, heart_curve, love_curve, love_hearts,
};

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Flattening tolerance used when converting curved shapes to paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// The predefined stamp shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Heart,
    Star,
    Circle,
    Square,
    Triangle,
    Flower,
    Smiley,
    Butterfly,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Heart,
        ShapeKind::Star,
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Flower,
        ShapeKind::Smiley,
        ShapeKind::Butterfly,
    ];

    /// Lowercase name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Heart => "heart",
            ShapeKind::Star => "star",
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Flower => "flower",
            ShapeKind::Smiley => "smiley",
            ShapeKind::Butterfly => "butterfly",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// One drawable piece of a stamp.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Fill { path: BezPath, color: InkColor },
    Stroke { path: BezPath, width: f64, color: InkColor },
}

impl Primitive {
    pub fn fill(path: BezPath, color: InkColor) -> Self {
        Primitive::Fill { path, color }
    }

    pub fn stroke(path: BezPath, width: f64, color: InkColor) -> Self {
        Primitive::Stroke { path, width, color }
    }

    pub fn path(&self) -> &BezPath {
        match self {
            Primitive::Fill { path, .. } | Primitive::Stroke { path, .. } => path,
        }
    }

    pub fn color(&self) -> InkColor {
        match self {
            Primitive::Fill { color, .. } | Primitive::Stroke { color, .. } => *color,
        }
    }
}

/// Geometry for `kind` placed at `anchor`.
pub fn stamp(kind: ShapeKind, anchor: Point, size: f64, color: InkColor) -> Vec<Primitive> {
    match kind {
        ShapeKind::Heart => vec![Primitive::fill(heart(anchor, size), color)],
        ShapeKind::Star => vec![Primitive::fill(star(anchor, size), color)],
        ShapeKind::Circle => vec![Primitive::fill(circle(anchor, size), color)],
        ShapeKind::Square => vec![Primitive::fill(square(anchor, size), color)],
        ShapeKind::Triangle => vec![Primitive::fill(triangle(anchor, size), color)],
        ShapeKind::Flower => flower(anchor, size, color),
        ShapeKind::Smiley => smiley(anchor, size),
        ShapeKind::Butterfly => butterfly(anchor, size, color),
    }
}
