//! Raster canvas the icons are painted on.
//!
//! A [`Canvas`] owns a `tiny-skia` pixmap filled with a vertical two-color gradient
//! and exposes the handful of anti-aliased primitives the glyph drawers need. Shapes
//! that collapse to nothing at small sizes are skipped rather than reported.

use crate::error::IconError;
use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use tiny_skia::{
    FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

/// Cubic Bézier handle length for approximating a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Largest canvas, in pixels, the renderer will allocate (8192 x 8192).
pub const MAX_CANVAS_PIXELS: u64 = 8192 * 8192;

/// Blend `top` into `bottom` for row `y` of a gradient `height` rows tall.
///
/// The mask for a row is `floor(255 * y / height)`, so row 0 is exactly `top` and the
/// last row lands within one mask step of `bottom`.
pub fn gradient_row_color(top: Rgb<u8>, bottom: Rgb<u8>, y: u32, height: u32) -> Rgb<u8> {
    let mask = (255 * u64::from(y) / u64::from(height.max(1))) as u32;
    let blend = |a: u8, b: u8| -> u8 {
        ((u32::from(a) * (255 - mask) + u32::from(b) * mask + 127) / 255) as u8
    };

    Rgb([
        blend(top[0], bottom[0]),
        blend(top[1], bottom[1]),
        blend(top[2], bottom[2]),
    ])
}

pub struct Canvas {
    pixmap: Pixmap,
    top: Rgb<u8>,
    bottom: Rgb<u8>,
}

impl Canvas {
    /// Allocate a `width` x `height` canvas painted with a top-to-bottom gradient.
    ///
    /// Empty canvases and canvases over [`MAX_CANVAS_PIXELS`] are refused before any
    /// memory is reserved.
    pub fn with_gradient(
        width: u32,
        height: u32,
        top: Rgb<u8>,
        bottom: Rgb<u8>,
    ) -> Result<Self, IconError> {
        let unavailable = IconError::CanvasUnavailable { width, height };
        if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
            return Err(unavailable);
        }
        let mut pixmap = Pixmap::new(width, height).ok_or(unavailable)?;

        let row_len = width as usize * 4;
        for (y, row) in pixmap.data_mut().chunks_exact_mut(row_len).enumerate() {
            let Rgb([r, g, b]) = gradient_row_color(top, bottom, y as u32, height);
            // Opaque pixels are identical in premultiplied and straight form.
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&[r, g, b, 255]);
            }
        }

        Ok(Self {
            pixmap,
            top,
            bottom,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Gradient color the canvas was initialized with at row `y`.
    pub fn background_at(&self, y: f32) -> Rgb<u8> {
        let row = y.clamp(0.0, (self.height() - 1) as f32) as u32;
        gradient_row_color(self.top, self.bottom, row, self.height())
    }

    /// Straight-alpha color of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba([c.red(), c.green(), c.blue(), c.alpha()]))
    }

    pub fn fill_rect(&mut self, left: f32, top: f32, right: f32, bottom: f32, color: Rgba<u8>) {
        match Rect::from_ltrb(left, top, right, bottom) {
            Some(rect) => self.fill(&PathBuilder::from_rect(rect), color),
            None => tracing::trace!(left, top, right, bottom, "skipping empty rectangle"),
        }
    }

    /// Fill a rectangle whose corners are rounded with `radius`, clamped to half the
    /// shorter side.
    pub fn fill_rounded_rect(
        &mut self,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        radius: f32,
        color: Rgba<u8>,
    ) {
        match rounded_rect_path(left, top, right, bottom, radius) {
            Some(path) => self.fill(&path, color),
            None => tracing::trace!(left, top, right, bottom, "skipping empty rounded rectangle"),
        }
    }

    /// Fill the ellipse inscribed in the given bounding box.
    pub fn fill_ellipse(&mut self, left: f32, top: f32, right: f32, bottom: f32, color: Rgba<u8>) {
        match Rect::from_ltrb(left, top, right, bottom).and_then(PathBuilder::from_oval) {
            Some(path) => self.fill(&path, color),
            None => tracing::trace!(left, top, right, bottom, "skipping empty ellipse"),
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
        self.fill_ellipse(cx - radius, cy - radius, cx + radius, cy + radius, color);
    }

    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba<u8>) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        for &(x, y) in rest {
            pb.line_to(x, y);
        }
        pb.close();

        match pb.finish() {
            Some(path) => self.fill(&path, color),
            None => tracing::trace!(points = points.len(), "skipping degenerate polygon"),
        }
    }

    /// Stroke a straight segment with butt caps.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba<u8>) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.0, from.1);
        pb.line_to(to.0, to.1);
        let Some(path) = pb.finish() else {
            tracing::trace!(?from, ?to, "skipping zero-length line");
            return;
        };

        let stroke = Stroke {
            width,
            line_cap: LineCap::Butt,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }

    /// Copy the canvas out as an opaque RGB image, dropping alpha.
    pub fn to_rgb_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width(), self.height(), |x, y| {
            let Rgba([r, g, b, _]) = self.pixel(x, y).unwrap_or(Rgba([0, 0, 0, 0]));
            Rgb([r, g, b])
        })
    }

    /// Copy the canvas out as a straight-alpha RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        ImageBuffer::from_fn(self.width(), self.height(), |x, y| {
            self.pixel(x, y).unwrap_or(Rgba([0, 0, 0, 0]))
        })
    }

    fn fill(&mut self, path: &Path, color: Rgba<u8>) {
        self.pixmap
            .fill_path(path, &paint(color), FillRule::Winding, Transform::identity(), None);
    }
}

fn paint(color: Rgba<u8>) -> Paint<'static> {
    let Rgba([r, g, b, a]) = color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn rounded_rect_path(left: f32, top: f32, right: f32, bottom: f32, radius: f32) -> Option<Path> {
    let rect = Rect::from_ltrb(left, top, right, bottom)?;
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    if r == 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }

    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}
