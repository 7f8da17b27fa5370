//! Single-line text layout from an embedded font.
//!
//! Glyphs are converted to outlines so text rasterizes like any other path
//! and looks the same on every machine.

use ab_glyph::{Font, FontArc, GlyphId, OutlineCurve};
use doodlepad_core::TextAlign;
use kurbo::{BezPath, Point};

/// Advance used per character when no font could be loaded.
const FALLBACK_ADVANCE: f64 = 0.55;

/// Lays out and measures text in the embedded UI font.
#[derive(Clone)]
pub struct TextLayout {
    font: Option<FontArc>,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayout {
    pub fn new() -> Self {
        let font = match FontArc::try_from_slice(epaint_default_fonts::UBUNTU_LIGHT) {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("Failed to load embedded font, text will not be drawn: {}", e);
                None
            }
        };
        Self { font }
    }

    fn scale(font: &FontArc, font_size: f64) -> f64 {
        let units = font.units_per_em().unwrap_or(1000.0) as f64;
        font_size / units
    }

    /// Glyph ids and their pen offsets in font units.
    fn glyph_run(font: &FontArc, text: &str) -> (Vec<(GlyphId, f64)>, f64) {
        let mut run = Vec::with_capacity(text.len());
        let mut pen = 0.0;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = font.glyph_id(c);
            if let Some(prev) = previous {
                pen += font.kern_unscaled(prev, id) as f64;
            }
            run.push((id, pen));
            pen += font.h_advance_unscaled(id) as f64;
            previous = Some(id);
        }
        (run, pen)
    }

    /// Advance width of `text` at `font_size`.
    pub fn measure(&self, text: &str, font_size: f64) -> f64 {
        match &self.font {
            Some(font) => Self::glyph_run(font, text).1 * Self::scale(font, font_size),
            None => text.chars().count() as f64 * font_size * FALLBACK_ADVANCE,
        }
    }

    /// Outline of `text` with its baseline at `anchor`.
    pub fn layout(&self, text: &str, anchor: Point, font_size: f64, align: TextAlign) -> BezPath {
        let origin = match align {
            TextAlign::Left => anchor,
            TextAlign::Center => Point::new(anchor.x - self.measure(text, font_size) / 2.0, anchor.y),
        };
        self.outline(text, origin, font_size)
    }

    /// Outline of `text` starting at the left end of the baseline.
    pub fn outline(&self, text: &str, origin: Point, font_size: f64) -> BezPath {
        let mut path = BezPath::new();
        let Some(font) = &self.font else {
            return path;
        };

        let scale = Self::scale(font, font_size);
        let (run, _) = Self::glyph_run(font, text);
        for (id, pen) in run {
            let Some(outline) = font.outline(id) else {
                continue;
            };
            // Font units are y-up.
            let map = |p: ab_glyph::Point| {
                Point::new(
                    origin.x + (pen + p.x as f64) * scale,
                    origin.y - p.y as f64 * scale,
                )
            };

            let mut current: Option<Point> = None;
            for curve in &outline.curves {
                let (start, end) = match curve {
                    OutlineCurve::Line(a, b) => (map(*a), map(*b)),
                    OutlineCurve::Quad(a, _, c) => (map(*a), map(*c)),
                    OutlineCurve::Cubic(a, _, _, d) => (map(*a), map(*d)),
                };
                if current != Some(start) {
                    if current.is_some() {
                        path.close_path();
                    }
                    path.move_to(start);
                }
                match curve {
                    OutlineCurve::Line(_, _) => path.line_to(end),
                    OutlineCurve::Quad(_, b, _) => path.quad_to(map(*b), end),
                    OutlineCurve::Cubic(_, b, c, _) => path.curve_to(map(*b), map(*c), end),
                }
                current = Some(end);
            }
            if current.is_some() {
                path.close_path();
            }
        }
        path
    }
}

impl std::fmt::Debug for TextLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayout")
            .field("font_loaded", &self.font.is_some())
            .finish()
    }
}
