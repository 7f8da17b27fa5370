//! Heart-curve sampling for the "declare love" macro.

use kurbo::{Point, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::Range;

/// Number of hearts placed along the curve.
pub const LOVE_SAMPLES: usize = 30;
/// Scale from curve units to logical pixels.
pub const LOVE_SCALE: f64 = 8.0;
/// Size range of each sampled heart.
pub const LOVE_HEART_SIZES: Range<f64> = 15.0..25.0;

/// Point on the classic heart curve at parameter `t`, in curve units with y
/// pointing down.
pub fn heart_curve(t: f64) -> Vec2 {
    let x = 16.0 * t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
    Vec2::new(x, y)
}

/// The sampled points of the curve around `center`.
pub fn love_curve(center: Point) -> impl Iterator<Item = Point> {
    (0..LOVE_SAMPLES).map(move |i| {
        let t = i as f64 / LOVE_SAMPLES as f64 * TAU;
        center + heart_curve(t) * LOVE_SCALE
    })
}

/// Anchor and size of every heart placed by the macro.
pub fn love_hearts<R: Rng + ?Sized>(center: Point, rng: &mut R) -> Vec<(Point, f64)> {
    love_curve(center)
        .map(|p| (p, rng.gen_range(LOVE_HEART_SIZES)))
        .collect()
}

/// The two captions written under the hearts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoveMessage {
    pub declaration: String,
    pub name: String,
}

impl Default for LoveMessage {
    fn default() -> Self {
        Self {
            declaration: "TE AMO".to_string(),
            name: "ISABELA LUETKEMEYER".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_curve_top_sample() {
        // t = 0 sits at the top notch of the heart
        let v = heart_curve(0.0);
        assert!(v.x.abs() < 1e-9);
        assert!((v.y + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_love_curve_sample_count() {
        let center = Point::new(200.0, 150.0);
        let points: Vec<Point> = love_curve(center).collect();
        assert_eq!(points.len(), LOVE_SAMPLES);
        assert!((points[0].x - 200.0).abs() < 1e-9);
        assert!((points[0].y - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_love_hearts_sizes_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let hearts = love_hearts(Point::new(0.0, 0.0), &mut rng);
        assert_eq!(hearts.len(), LOVE_SAMPLES);
        assert!(hearts.iter().all(|(_, s)| LOVE_HEART_SIZES.contains(s)));
    }

    #[test]
    fn test_love_hearts_reproducible_with_seed() {
        let a = love_hearts(Point::ZERO, &mut StdRng::seed_from_u64(42));
        let b = love_hearts(Point::ZERO, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
