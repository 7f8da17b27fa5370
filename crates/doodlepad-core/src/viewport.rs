//! Display size and pixel density of the drawing surface.

use kurbo::{Affine, Point, Size};
use serde::{Deserialize, Serialize};

/// Largest backing dimension a raster surface accepts.
pub const MAX_PIXEL_DIMENSION: u32 = u16::MAX as u32;

/// Maps logical (display pixel) coordinates onto the backing pixel grid.
///
/// All scene geometry lives in logical coordinates; only the surface ever
/// sees device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Size of the surface in logical pixels.
    pub size: Size,
    /// Device pixels per logical pixel.
    pub scale_factor: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: Size::new(800.0, 600.0),
            scale_factor: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport. Non-finite or non-positive scale factors fall back to 1.
    pub fn new(size: Size, scale_factor: f64) -> Self {
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            log::warn!("Ignoring invalid scale factor {}", scale_factor);
            1.0
        };
        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        Self { size, scale_factor }
    }

    /// Transform from logical to device pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor)
    }

    /// Backing store dimensions in device pixels, at least 1x1.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dim = |logical: f64| {
            let px = (logical * self.scale_factor).ceil();
            (px as u32).clamp(1, MAX_PIXEL_DIMENSION)
        };
        (dim(self.size.width), dim(self.size.height))
    }

    /// Center of the surface in logical coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }
}
