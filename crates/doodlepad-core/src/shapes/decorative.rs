//! Multi-part stamps: flower, smiley, butterfly.

use super::{InkColor, PATH_TOLERANCE, Primitive};
use kurbo::{Arc, Circle, Ellipse, Point, Rect, Shape as KurboShape, Vec2};
use std::f64::consts::PI;

const PETALS: usize = 6;

fn disc(center: Point, radius: f64) -> kurbo::BezPath {
    Circle::new(center, radius).to_path(PATH_TOLERANCE)
}

fn oval(center: Point, rx: f64, ry: f64) -> kurbo::BezPath {
    Ellipse::new(center, (rx, ry), 0.0).to_path(PATH_TOLERANCE)
}

/// Six petals around a gold center.
pub fn flower(anchor: Point, size: f64, color: InkColor) -> Vec<Primitive> {
    let mut parts: Vec<Primitive> = (0..PETALS)
        .map(|i| {
            let angle = i as f64 * PI / 3.0;
            let center = anchor + Vec2::from_angle(angle) * (size * 0.6);
            Primitive::fill(disc(center, size * 0.4), color)
        })
        .collect();
    parts.push(Primitive::fill(disc(anchor, size * 0.3), InkColor::GOLD));
    parts
}

/// Gold face with black eyes and mouth. Always drawn in its own colors.
pub fn smiley(anchor: Point, size: f64) -> Vec<Primitive> {
    let eye = size * 0.1;
    let mouth = Arc::new(
        anchor + Vec2::new(0.0, size * 0.2),
        Vec2::new(size * 0.5, size * 0.5),
        0.0,
        PI,
        0.0,
    );
    vec![
        Primitive::fill(disc(anchor, size), InkColor::GOLD),
        Primitive::fill(
            disc(anchor + Vec2::new(-size * 0.3, -size * 0.3), eye),
            InkColor::BLACK,
        ),
        Primitive::fill(
            disc(anchor + Vec2::new(size * 0.3, -size * 0.3), eye),
            InkColor::BLACK,
        ),
        Primitive::stroke(mouth.to_path(PATH_TOLERANCE), size * 0.1, InkColor::BLACK),
    ]
}

/// Four wings and a brown body.
pub fn butterfly(anchor: Point, size: f64, color: InkColor) -> Vec<Primitive> {
    let upper = |dx: f64| oval(anchor + Vec2::new(dx, -size * 0.3), size * 0.4, size * 0.6);
    let lower = |dx: f64| oval(anchor + Vec2::new(dx, size * 0.4), size * 0.3, size * 0.4);
    let body = Rect::new(
        anchor.x - size * 0.05,
        anchor.y - size,
        anchor.x + size * 0.05,
        anchor.y + size,
    );

    vec![
        Primitive::fill(upper(-size * 0.4), color),
        Primitive::fill(upper(size * 0.4), color),
        Primitive::fill(lower(-size * 0.3), color),
        Primitive::fill(lower(size * 0.3), color),
        Primitive::fill(body.to_path(PATH_TOLERANCE), InkColor::SADDLE_BROWN),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flower_has_petals_then_center() {
        let parts = flower(Point::new(50.0, 50.0), 10.0, InkColor::RED);
        assert_eq!(parts.len(), PETALS + 1);
        assert!(parts[..PETALS].iter().all(|p| p.color() == InkColor::RED));
        assert_eq!(parts[PETALS].color(), InkColor::GOLD);

        // first petal is centered to the right of the anchor
        let bbox = parts[0].path().bounding_box();
        assert!((bbox.center().x - 56.0).abs() < 0.1);
        assert!((bbox.center().y - 50.0).abs() < 0.1);
    }

    #[test]
    fn test_smiley_ignores_entry_color() {
        let parts = smiley(Point::new(0.0, 0.0), 20.0);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0].color(), InkColor::GOLD);
        assert!(parts[1..].iter().all(|p| p.color() == InkColor::BLACK));
        match &parts[3] {
            Primitive::Stroke { width, .. } => assert!((width - 2.0).abs() < f64::EPSILON),
            other => panic!("mouth should be stroked, got {other:?}"),
        }
    }

    #[test]
    fn test_smiley_mouth_is_lower_half() {
        let parts = smiley(Point::new(0.0, 0.0), 20.0);
        let bbox = parts[3].path().bounding_box();
        // arc centered at y = 4 with radius 10 spanning the bottom
        assert!((bbox.min_y() - 4.0).abs() < 0.1);
        assert!((bbox.max_y() - 14.0).abs() < 0.1);
    }

    #[test]
    fn test_butterfly_body_color() {
        let parts = butterfly(Point::new(0.0, 0.0), 10.0, InkColor::DEEP_PINK);
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[4].color(), InkColor::SADDLE_BROWN);
        let body = parts[4].path().bounding_box();
        assert!((body.width() - 1.0).abs() < 1e-9);
        assert!((body.height() - 20.0).abs() < 1e-9);
        assert!(body.center().x.abs() < 1e-9);
    }
}
