//! Pixel statistics used to check rendered icons.

use image::RgbaImage;

/// Per-channel difference between an image and its horizontal mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorDeviation {
    /// Largest absolute channel difference of any pixel pair.
    pub max: u8,
    /// Mean absolute channel difference over every color channel.
    pub mean: f64,
}

/// Compare every pixel with its counterpart mirrored about the vertical center line.
pub fn mirror_deviation(img: &RgbaImage) -> MirrorDeviation {
    let (width, height) = img.dimensions();
    let mut max = 0u8;
    let mut total = 0u64;

    for (x, y, pixel) in img.enumerate_pixels() {
        let mirrored = img.get_pixel(width - 1 - x, y);
        for c in 0..3 {
            let diff = pixel[c].abs_diff(mirrored[c]);
            max = max.max(diff);
            total += u64::from(diff);
        }
    }

    let channels = u64::from(width) * u64::from(height) * 3;
    MirrorDeviation {
        max,
        mean: if channels == 0 {
            0.0
        } else {
            total as f64 / channels as f64
        },
    }
}

/// Average RGB color of row `y`.
pub fn row_average(img: &RgbaImage, y: u32) -> [f64; 3] {
    let width = img.width();
    let mut sums = [0u64; 3];
    for x in 0..width {
        let pixel = img.get_pixel(x, y);
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += u64::from(channel);
        }
    }

    sums.map(|sum| sum as f64 / f64::from(width.max(1)))
}
