//! Glyph drawers and the fixed icon table.
//!
//! Every drawer takes the glyph center, a glyph size in pixels and a fill color, and
//! lays its primitives out as integer fractions of that size. Horizontal spans are
//! placed symmetrically around the center column so mirrored output only differs by
//! anti-aliasing noise.

use crate::canvas::Canvas;
use crate::error::IconError;
use image::{Rgb, Rgba};
use std::{f32::consts::PI, fmt, str::FromStr};

/// Stamps a glyph onto `canvas` centered at `(cx, cy)`, `size` pixels across.
pub type GlyphDrawer = fn(canvas: &mut Canvas, cx: f32, cy: f32, size: u32, color: Rgba<u8>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    Waveform,
    Calculator,
    Weather,
    Notes,
    Wellness,
}

impl IconId {
    pub const ALL: [IconId; 5] = [
        IconId::Waveform,
        IconId::Calculator,
        IconId::Weather,
        IconId::Notes,
        IconId::Wellness,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IconId::Waveform => "Waveform",
            IconId::Calculator => "Calculator",
            IconId::Weather => "Weather",
            IconId::Notes => "Notes",
            IconId::Wellness => "Wellness",
        }
    }

    /// Table entry holding this icon's colors and drawer.
    pub fn spec(self) -> &'static IconSpec {
        match self {
            IconId::Waveform => &APP_ICON,
            IconId::Calculator => &ALTERNATE_ICONS[0],
            IconId::Weather => &ALTERNATE_ICONS[1],
            IconId::Notes => &ALTERNATE_ICONS[2],
            IconId::Wellness => &ALTERNATE_ICONS[3],
        }
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconId {
    type Err = IconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| IconError::UnknownIcon {
                name: s.to_string(),
            })
    }
}

/// Gradient colors and glyph drawer for one icon.
pub struct IconSpec {
    pub id: IconId,
    pub top: Rgb<u8>,
    pub bottom: Rgb<u8>,
    pub draw: GlyphDrawer,
}

impl IconSpec {
    /// Find an alternate icon by its exact name, e.g. `"Calculator"`.
    pub fn lookup_alternate(name: &str) -> Result<&'static IconSpec, IconError> {
        ALTERNATE_ICONS
            .iter()
            .find(|spec| spec.id.as_str() == name)
            .ok_or_else(|| IconError::UnknownIcon {
                name: name.to_string(),
            })
    }
}

/// Purple waveform icon shipped as the primary app icon.
pub static APP_ICON: IconSpec = IconSpec {
    id: IconId::Waveform,
    top: Rgb([124, 58, 237]),
    bottom: Rgb([167, 85, 255]),
    draw: draw_waveform,
};

/// Stealth-mode icons, in generation order.
pub static ALTERNATE_ICONS: [IconSpec; 4] = [
    IconSpec {
        id: IconId::Calculator,
        top: Rgb([100, 120, 140]),
        bottom: Rgb([140, 160, 180]),
        draw: draw_calculator,
    },
    IconSpec {
        id: IconId::Weather,
        top: Rgb([70, 130, 200]),
        bottom: Rgb([100, 180, 255]),
        draw: draw_weather,
    },
    IconSpec {
        id: IconId::Notes,
        top: Rgb([255, 200, 80]),
        bottom: Rgb([255, 220, 100]),
        draw: draw_notes,
    },
    IconSpec {
        id: IconId::Wellness,
        top: Rgb([200, 100, 150]),
        bottom: Rgb([230, 130, 180]),
        draw: draw_wellness,
    },
];

/// Alpha of the Notes text lines painted over the paper.
const NOTE_LINE_ALPHA: u8 = 180;

/// Integer fraction of the glyph size, `size / div`, as a coordinate.
fn frac(size: u32, div: u32) -> f32 {
    (size / div) as f32
}

/// `floor(size * ratio)` as a coordinate.
fn scaled(size: u32, ratio: f32) -> f32 {
    (size as f32 * ratio).floor()
}

/// Five pill-shaped bars, tallest in the middle.
pub fn draw_waveform(canvas: &mut Canvas, cx: f32, cy: f32, size: u32, color: Rgba<u8>) {
    let bar_width = size / 10;
    let half_bar = (bar_width / 2) as f32;
    let step = (bar_width + size / 12) as f32;

    for (k, ratio) in [(-2.0, 0.5), (-1.0, 0.7), (0.0, 1.0), (1.0, 0.7), (2.0, 0.5)] {
        let x = cx + k * step;
        let half_height = (size as f32 * ratio / 2.0).floor();
        canvas.fill_rounded_rect(
            x - half_bar,
            cy - half_height,
            x + half_bar,
            cy + half_height,
            half_bar,
            color,
        );
    }
}

/// A display strip above a 3x3 keypad.
pub fn draw_calculator(canvas: &mut Canvas, cx: f32, cy: f32, size: u32, color: Rgba<u8>) {
    let display_height = frac(size, 5);
    let display_half = scaled(size, 0.8) / 2.0;
    let display_y = cy - frac(size, 2) + frac(size, 10);
    canvas.fill_rounded_rect(
        cx - display_half,
        display_y,
        cx + display_half,
        display_y + display_height,
        frac(size, 30),
        color,
    );

    let button = size / 7;
    let button_size = button as f32;
    let spacing = frac(size, 15);
    let grid_left = cx - (3.0 * button_size + 2.0 * spacing) / 2.0;
    let start_y = display_y + display_height + spacing * 2.0;
    let radius = (button / 4) as f32;

    for row in 0..3 {
        for col in 0..3 {
            let x = grid_left + col as f32 * (button_size + spacing);
            let y = start_y + row as f32 * (button_size + spacing);
            canvas.fill_rounded_rect(x, y, x + button_size, y + button_size, radius, color);
        }
    }
}

/// A sun with eight rays peeking over a three-lobed cloud.
pub fn draw_weather(canvas: &mut Canvas, cx: f32, cy: f32, size: u32, color: Rgba<u8>) {
    let sun_y = cy - frac(size, 6);
    let inner = frac(size, 4);
    let outer = inner + frac(size, 6);
    let ray_width = frac(size, 40).max(1.0);

    for i in 0..8 {
        let angle = i as f32 * PI / 4.0;
        let (sin, cos) = angle.sin_cos();
        canvas.line(
            (cx + cos * inner, sun_y + sin * inner),
            (cx + cos * outer, sun_y + sin * outer),
            ray_width,
            color,
        );
    }

    canvas.fill_circle(cx, sun_y, frac(size, 8), color);

    let cloud_y = cy + frac(size, 10);
    let lobe = frac(size, 10);
    canvas.fill_ellipse(cx - frac(size, 4), cloud_y - lobe, cx, cloud_y + lobe, color);
    canvas.fill_ellipse(
        cx - frac(size, 6),
        cloud_y - frac(size, 6),
        cx + frac(size, 6),
        cloud_y + frac(size, 8),
        color,
    );
    canvas.fill_ellipse(cx, cloud_y - lobe, cx + frac(size, 4), cloud_y + lobe, color);
}

/// A sheet of paper with four ruled text lines.
///
/// The lines take the background color of their row at partial opacity, so they
/// read as tinted grooves in the paper.
pub fn draw_notes(canvas: &mut Canvas, cx: f32, cy: f32, size: u32, color: Rgba<u8>) {
    let paper_w = scaled(size, 0.65);
    let paper_h = scaled(size, 0.8);
    let paper_x = cx - (paper_w / 2.0).floor();
    let paper_y = cy - (paper_h / 2.0).floor();
    canvas.fill_rounded_rect(
        paper_x,
        paper_y,
        paper_x + paper_w,
        paper_y + paper_h,
        frac(size, 30),
        color,
    );

    let spacing = frac(size, 8);
    let line_w = (paper_w * 0.8).floor();
    let line_h = frac(size, 40).max(1.0);
    let line_x = paper_x + (paper_w / 10.0).floor();

    for i in 0..4 {
        let line_y = paper_y + (paper_h / 4.0).floor() + i as f32 * spacing;
        let Rgb([r, g, b]) = canvas.background_at(line_y);
        canvas.fill_rect(
            line_x,
            line_y,
            line_x + line_w,
            line_y + line_h,
            Rgba([r, g, b, NOTE_LINE_ALPHA]),
        );
    }
}

/// A heart assembled from two circles, a triangle and a filler rectangle.
pub fn draw_wellness(canvas: &mut Canvas, cx: f32, cy: f32, size: u32, color: Rgba<u8>) {
    let heart = (size as f32 * 0.6) as u32;
    let lobe_offset = (heart / 4) as f32;
    let lobe_y = cy - (heart / 6) as f32;
    let radius = (heart / 3) as f32;
    let left_x = cx - lobe_offset;
    let right_x = cx + lobe_offset;

    canvas.fill_circle(left_x, lobe_y, radius, color);
    canvas.fill_circle(right_x, lobe_y, radius, color);

    canvas.fill_polygon(
        &[
            (left_x - radius, lobe_y),
            (right_x + radius, lobe_y),
            (cx, cy + (heart / 2) as f32),
        ],
        color,
    );

    canvas.fill_rect(
        left_x,
        lobe_y - radius,
        right_x,
        cy + (heart / 4) as f32,
        color,
    );
}
