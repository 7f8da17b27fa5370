//! CPU raster surface backed by `vello_cpu`.

use crate::display_list::{DisplayList, DrawCommand};
use crate::renderer::RenderResult;
use doodlepad_core::{InkColor, Viewport};
use kurbo::{Affine, Rect, Shape};
use vello_cpu::{Pixmap, RenderContext as RasterContext};

/// Exported surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportImage {
    /// Unpremultiplied RGBA8, row-major.
    pub rgba_data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ExportImage {
    /// Encode as PNG.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.rgba_data)?;
        }
        Ok(png_data)
    }
}

fn pixel_dims(viewport: &Viewport) -> (u16, u16) {
    let (w, h) = viewport.pixel_size();
    (
        u16::try_from(w).unwrap_or(u16::MAX),
        u16::try_from(h).unwrap_or(u16::MAX),
    )
}

/// The drawable backing store: pixel size follows the viewport's display
/// size times its scale factor, drawing happens in logical coordinates.
pub struct Surface {
    viewport: Viewport,
    raster: RasterContext,
    pixmap: Pixmap,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        let (w, h) = pixel_dims(&viewport);
        log::info!(
            "Creating {}x{} surface ({}x{} @ {}x)",
            w,
            h,
            viewport.size.width,
            viewport.size.height,
            viewport.scale_factor
        );
        Self {
            viewport,
            raster: RasterContext::new(w, h),
            pixmap: Pixmap::new(w, h),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Backing store size in device pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixmap.width() as u32, self.pixmap.height() as u32)
    }

    fn device_rect(&self) -> Rect {
        let (w, h) = self.pixel_size();
        Rect::new(0.0, 0.0, w as f64, h as f64)
    }

    /// Rebuild the backing store for `viewport`. Contents are lost until the
    /// next [`Surface::present`].
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        let (w, h) = pixel_dims(&viewport);
        log::info!("Resizing surface to {}x{}", w, h);
        self.viewport = viewport;
        self.raster = RasterContext::new(w, h);
        self.pixmap = Pixmap::new(w, h);
    }

    /// Rasterize a full frame.
    pub fn present(&mut self, list: &DisplayList) {
        let device = self.device_rect();
        let logical = self.viewport.transform();

        self.raster.reset();
        for command in list.iter() {
            encode(&mut self.raster, command, Affine::IDENTITY, logical, device);
        }
        self.raster.flush();
        self.raster.render_to_pixmap(&mut self.pixmap);
    }

    /// Draw `segment` over the current pixels.
    ///
    /// Only the device rectangle the commands can touch is rasterized, into a
    /// scratch pixmap that is then composited source-over onto the surface.
    /// Nothing is retained: the next [`Surface::present`] replaces it.
    pub fn paint_segment(&mut self, segment: &DisplayList) {
        let device = self.device_rect();
        let logical = self.viewport.transform();

        let bounds = segment
            .iter()
            .map(|command| command_bounds(command, logical, device))
            .reduce(|a, b| a.union(b));
        let Some(bounds) = bounds.map(|b| b.expand().intersect(device)) else {
            return;
        };
        if !bounds.is_finite() || bounds.width() < 1.0 || bounds.height() < 1.0 {
            return;
        }

        let (x0, y0) = (bounds.x0 as usize, bounds.y0 as usize);
        let (sw, sh) = (bounds.width() as u16, bounds.height() as u16);
        let offset = Affine::translate((-bounds.x0, -bounds.y0));

        let mut scratch = RasterContext::new(sw, sh);
        for command in segment.iter() {
            encode(&mut scratch, command, offset, logical, device);
        }
        scratch.flush();
        let mut layer = Pixmap::new(sw, sh);
        scratch.render_to_pixmap(&mut layer);

        let stride = self.pixmap.width() as usize * 4;
        let row_len = sw as usize * 4;
        let dst = self.pixmap.data_as_u8_slice_mut();
        for (row, src) in layer.data_as_u8_slice().chunks_exact(row_len).enumerate() {
            let start = (y0 + row) * stride + x0 * 4;
            let Some(dst_row) = dst.get_mut(start..start + row_len) else {
                break;
            };
            for (d, s) in dst_row.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                source_over(d, s);
            }
        }
    }

    /// Unpremultiplied color of one device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<InkColor> {
        let (w, h) = self.pixel_size();
        if x >= w || y >= h {
            return None;
        }
        let i = ((y * w + x) * 4) as usize;
        let px = self.pixmap.data_as_u8_slice().get(i..i + 4)?;
        let [r, g, b, a] = unpremultiply([px[0], px[1], px[2], px[3]]);
        Some(InkColor::new(r, g, b, a))
    }

    /// Copy of the current pixels.
    pub fn snapshot(&self) -> ExportImage {
        let (width, height) = self.pixel_size();
        let rgba_data = self
            .pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .flat_map(|px| unpremultiply([px[0], px[1], px[2], px[3]]))
            .collect();
        ExportImage {
            rgba_data,
            width,
            height,
        }
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("viewport", &self.viewport)
            .field("pixel_size", &self.pixel_size())
            .finish()
    }
}

fn encode(
    raster: &mut RasterContext,
    command: &DrawCommand,
    offset: Affine,
    logical: Affine,
    device: Rect,
) {
    match command {
        DrawCommand::Clear { color } => {
            raster.set_transform(offset);
            raster.set_paint(*color);
            raster.fill_rect(&device);
        }
        DrawCommand::Fill { path, color } | DrawCommand::Text { outline: path, color } => {
            raster.set_transform(offset * logical);
            raster.set_paint(*color);
            raster.fill_path(path);
        }
        DrawCommand::Stroke {
            path,
            stroke,
            color,
        } => {
            raster.set_transform(offset * logical);
            raster.set_stroke(stroke.clone());
            raster.set_paint(*color);
            raster.stroke_path(path);
        }
    }
}

/// Device-space area a command may cover, with a pixel of antialiasing slack.
fn command_bounds(command: &DrawCommand, logical: Affine, device: Rect) -> Rect {
    let local = match command {
        DrawCommand::Clear { .. } => return device,
        DrawCommand::Fill { path, .. } | DrawCommand::Text { outline: path, .. } => {
            path.bounding_box()
        }
        DrawCommand::Stroke { path, stroke, .. } => {
            let half = stroke.width / 2.0;
            path.bounding_box().inflate(half, half)
        }
    };
    logical.transform_rect_bbox(local).inflate(1.0, 1.0)
}

/// Premultiplied source-over.
fn source_over(dst: &mut [u8], src: &[u8]) {
    let inv = 255 - src[3] as u32;
    for (d, s) in dst.iter_mut().zip(src) {
        *d = (*s as u32 + (*d as u32 * inv + 127) / 255).min(255) as u8;
    }
}

fn unpremultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    match a {
        0 => [0, 0, 0, 0],
        255 => [r, g, b, a],
        _ => {
            let un = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
            [un(r), un(g), un(b), a]
        }
    }
}
