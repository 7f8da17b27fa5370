//! Single-path stamps: heart, star, circle, square, triangle.

use super::PATH_TOLERANCE;
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};
use std::f64::consts::PI;

/// Ratio of the heart's lobe height to its size.
const HEART_LOBE: f64 = 0.3;
/// Number of star points.
const STAR_SPIKES: usize = 5;
/// Inner radius of a star relative to its outer radius.
const STAR_INNER: f64 = 0.4;

/// Heart whose cusp sits `0.3 * size` below the anchor and whose tip sits
/// `size` below it.
pub fn heart(anchor: Point, size: f64) -> BezPath {
    let Point { x, y } = anchor;
    let half = size / 2.0;
    let lobe = size * HEART_LOBE;
    let mid = y + (lobe + size) / 2.0;

    let mut path = BezPath::new();
    path.move_to((x, y + lobe));
    path.curve_to((x, y), (x - half, y), (x - half, y + lobe));
    path.curve_to((x - half, mid), (x, mid), (x, y + size));
    path.curve_to((x, mid), (x + half, mid), (x + half, y + lobe));
    path.curve_to((x + half, y), (x, y), (x, y + lobe));
    path.close_path();
    path
}

/// Five-pointed star, first spike pointing straight up.
pub fn star(anchor: Point, size: f64) -> BezPath {
    let inner = size * STAR_INNER;
    let mut path = BezPath::new();
    for i in 0..STAR_SPIKES * 2 {
        let radius = if i % 2 == 0 { size } else { inner };
        let angle = i as f64 * PI / STAR_SPIKES as f64 - PI / 2.0;
        let p = Point::new(
            anchor.x + angle.cos() * radius,
            anchor.y + angle.sin() * radius,
        );
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

pub fn circle(anchor: Point, size: f64) -> BezPath {
    Circle::new(anchor, size).to_path(PATH_TOLERANCE)
}

/// Axis-aligned square with half-side `size`.
pub fn square(anchor: Point, size: f64) -> BezPath {
    Rect::new(
        anchor.x - size,
        anchor.y - size,
        anchor.x + size,
        anchor.y + size,
    )
    .to_path(PATH_TOLERANCE)
}

pub fn triangle(anchor: Point, size: f64) -> BezPath {
    let Point { x, y } = anchor;
    let mut path = BezPath::new();
    path.move_to((x, y - size));
    path.line_to((x - size, y + size));
    path.line_to((x + size, y + size));
    path.close_path();
    path
}
