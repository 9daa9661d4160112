use crate::canvas::Canvas;
use crate::contents_json::{write_contents_json, ContentsFile, ImageEntry};
use crate::error::IconError;
use crate::glyphs::{IconSpec, ALTERNATE_ICONS, APP_ICON};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgba,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Pixel size of the primary app icon.
pub const APP_ICON_SIZE: u32 = 1024;

/// Pixel sizes every alternate icon is rendered at (`@2x` and `@3x`).
pub const ALTERNATE_SIZES: [u32; 2] = [120, 180];

/// Point size the `@Nx` scale suffix of alternate icons is relative to.
pub const SCALE_BASE: u32 = 60;

const GLYPH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Where the full generation run writes its files.
#[derive(Debug, Clone)]
pub struct Layout {
    pub app_icon: PathBuf,
    pub alternates_dir: PathBuf,
}

impl Layout {
    /// Standard locations inside an Xcode project folder.
    pub fn for_project(project_dir: &Path) -> Self {
        Self {
            app_icon: project_dir
                .join("Assets.xcassets")
                .join("AppIcon.appiconset")
                .join("icon-1024.png"),
            alternates_dir: project_dir.join("Icons"),
        }
    }
}

/// Render `spec` onto a fresh `size` x `size` canvas.
///
/// The glyph is centered and sized to half the canvas.
pub fn render_icon(spec: &IconSpec, size: u32) -> Result<Canvas, IconError> {
    tracing::debug!(icon = %spec.id, size, "rendering icon");

    let mut canvas = Canvas::with_gradient(size, size, spec.top, spec.bottom)?;
    let center = size as f32 / 2.0;
    let glyph_size = (size as f32 * 0.5) as u32;
    (spec.draw)(&mut canvas, center, center, glyph_size, GLYPH_COLOR);

    Ok(canvas)
}

/// File name of an alternate icon at `size`, e.g. `Calculator@2x.png` for 120.
pub fn alternate_filename(spec: &IconSpec, size: u32) -> String {
    format!("{}@{}x.png", spec.id, size / SCALE_BASE)
}

/// Render the waveform app icon and save it as an opaque RGB PNG.
pub fn generate_app_icon(output_path: &Path, size: u32) -> Result<PathBuf> {
    let canvas = render_icon(&APP_ICON, size)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).context("Can't create app icon directory")?;
    }

    let rgb = canvas.to_rgb_image();
    save_png(rgb.as_raw(), output_path, size, ColorType::Rgb8)?;
    println!("✅ Created app icon: {}", output_path.display());

    Ok(output_path.to_path_buf())
}

/// Write an asset catalog `Contents.json` next to the app icon that names it as the
/// single-size iOS icon.
pub fn write_app_icon_contents(icon_path: &Path, size: u32) -> Result<()> {
    let dir = icon_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let filename = icon_path
        .file_name()
        .context("App icon path has no file name")?
        .to_string_lossy()
        .into_owned();

    let mut contents = ContentsFile::new("voiceit-icons".to_string());
    contents.add_image(ImageEntry::single_size_ios(filename, size));
    write_contents_json(dir, &contents)?;

    println!("✅ Created {}", dir.join("Contents.json").display());
    Ok(())
}

/// Render one alternate icon and save it as an RGBA PNG in `out_dir`.
///
/// Fails with [`IconError::UnknownIcon`] before touching the file system when
/// `name` is not one of the stealth icons.
pub fn create_alternate_icon(name: &str, out_dir: &Path, size: u32) -> Result<PathBuf> {
    let spec = IconSpec::lookup_alternate(name)?;
    let canvas = render_icon(spec, size)?;

    let output_path = out_dir.join(alternate_filename(spec, size));
    let rgba = canvas.to_rgba_image();
    save_png(rgba.as_raw(), &output_path, size, ColorType::Rgba8)?;
    println!("✅ Created {} icon: {}", spec.id, output_path.display());

    Ok(output_path)
}

/// Generate every requested alternate icon at each of [`ALTERNATE_SIZES`].
///
/// Unknown names are reported and skipped; any other failure stops the run.
pub fn generate_alternate_icons<S: AsRef<str>>(names: &[S], out_dir: &Path) -> Result<Vec<PathBuf>> {
    create_dir_all(out_dir).context("Can't create output directory")?;

    let mut written = Vec::new();
    'icons: for name in names {
        let name = name.as_ref();
        for size in ALTERNATE_SIZES {
            match create_alternate_icon(name, out_dir, size) {
                Ok(path) => written.push(path),
                Err(err) => match err.downcast_ref::<IconError>() {
                    Some(IconError::UnknownIcon { .. }) => {
                        eprintln!("❌ {err}");
                        continue 'icons;
                    }
                    _ => return Err(err),
                },
            }
        }
    }

    Ok(written)
}

/// Names of all stealth icons in generation order.
pub fn alternate_names() -> Vec<&'static str> {
    ALTERNATE_ICONS.iter().map(|spec| spec.id.as_str()).collect()
}

/// Full fixed sequence: app icon, every alternate at both sizes, Xcode notes.
pub fn generate_all(layout: &Layout) -> Result<()> {
    generate_app_icon(&layout.app_icon, APP_ICON_SIZE)?;
    println!("\n🎉 App icon generated successfully!");

    generate_alternate_icons(&alternate_names(), &layout.alternates_dir)?;
    print_alternate_summary(&layout.alternates_dir);

    Ok(())
}

/// Success banner plus the manual steps for adding the icons to the Xcode target.
pub fn print_alternate_summary(out_dir: &Path) {
    println!("\n🎉 All alternate icons generated successfully!");
    println!("📁 Icons saved to: {}/", out_dir.display());
    println!("\n⚠️  IMPORTANT: You need to add these files to your Xcode project:");
    println!("   1. In Xcode, right-click on 'VoiceIt' folder");
    println!("   2. Select 'Add Files to VoiceIt...'");
    println!("   3. Navigate to the Icons/ folder");
    println!("   4. Select all .png files");
    println!("   5. Ensure 'Copy items if needed' is checked");
    println!("   6. Ensure 'VoiceIt' target is selected");
    println!("   7. Click 'Add'");
    println!("\n   Then rebuild the app and upload to App Store Connect.");
}

fn save_png(data: &[u8], path: &Path, size: u32, color: ColorType) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(data, &mut out, size, color)?;
    out.flush().context("Failed to write PNG")?;
    Ok(())
}

// Encode square image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32, color: ColorType) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(image_data, size, size, color)
        .context("Failed to encode PNG")?;
    tracing::debug!(size, ?color, "encoded png");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{mirror_deviation, row_average};
    use image::Rgb;

    #[test]
    fn test_alternate_filenames_use_scale_suffix() {
        let calculator = IconSpec::lookup_alternate("Calculator").unwrap();
        assert_eq!(alternate_filename(calculator, 120), "Calculator@2x.png");
        assert_eq!(alternate_filename(calculator, 180), "Calculator@3x.png");
    }

    #[test]
    fn test_layout_for_project() {
        let layout = Layout::for_project(Path::new("VoiceIt"));
        assert_eq!(
            layout.app_icon,
            Path::new("VoiceIt/Assets.xcassets/AppIcon.appiconset/icon-1024.png")
        );
        assert_eq!(layout.alternates_dir, Path::new("VoiceIt/Icons"));
    }

    #[test]
    fn test_render_dimensions_match_request() {
        for size in ALTERNATE_SIZES.into_iter().chain([APP_ICON_SIZE]) {
            let canvas = render_icon(&APP_ICON, size).unwrap();
            assert_eq!((canvas.width(), canvas.height()), (size, size));
        }
    }

    #[test]
    fn test_gradient_rows_survive_rendering() {
        for spec in ALTERNATE_ICONS.iter() {
            let img = render_icon(spec, 180).unwrap().to_rgba_image();
            let top = row_average(&img, 0);
            let bottom = row_average(&img, 179);
            let Rgb(expected_top) = spec.top;
            let Rgb(expected_bottom) = spec.bottom;
            for c in 0..3 {
                assert!((top[c] - f64::from(expected_top[c])).abs() < 0.5);
                assert!((bottom[c] - f64::from(expected_bottom[c])).abs() <= 2.5);
            }
        }
    }

    #[test]
    fn test_symmetric_glyphs_mirror_cleanly() {
        let symmetric = [&APP_ICON, &ALTERNATE_ICONS[0], &ALTERNATE_ICONS[1], &ALTERNATE_ICONS[3]];
        for spec in symmetric {
            for size in [59, 120, 121, 180] {
                let img = render_icon(spec, size).unwrap().to_rgba_image();
                let deviation = mirror_deviation(&img);
                assert!(
                    deviation.max <= 40 && deviation.mean < 1.0,
                    "{} at {} is lopsided: {:?}",
                    spec.id,
                    size,
                    deviation
                );
            }
        }
    }

    #[test]
    fn test_glyph_is_white_at_center_of_waveform() {
        let canvas = render_icon(&APP_ICON, 1024).unwrap();
        assert_eq!(canvas.pixel(512, 512), Some(GLYPH_COLOR));
    }

    #[test]
    fn test_png_encoding_is_deterministic() {
        let img = render_icon(&ALTERNATE_ICONS[1], 120).unwrap().to_rgba_image();
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_png(img.as_raw(), &mut first, 120, ColorType::Rgba8).unwrap();
        write_png(img.as_raw(), &mut second, 120, ColorType::Rgba8).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_alternate_writes_nothing() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let err = create_alternate_icon("Sports", temp_dir.path(), 120).unwrap_err();

        assert_eq!(
            err.downcast_ref::<IconError>(),
            Some(&IconError::UnknownIcon {
                name: "Sports".to_string()
            })
        );
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_batch_skips_unknown_names() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let written =
            generate_alternate_icons(&["Sports", "Weather"], temp_dir.path()).unwrap();

        assert_eq!(
            written,
            vec![
                temp_dir.path().join("Weather@2x.png"),
                temp_dir.path().join("Weather@3x.png"),
            ]
        );
        assert!(!temp_dir.path().join("Sports@2x.png").exists());
    }

    #[test]
    fn test_app_icon_contents_json() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let icon = temp_dir.path().join("AppIcon.appiconset").join("icon-1024.png");
        generate_app_icon(&icon, 64).unwrap();
        write_app_icon_contents(&icon, 64).unwrap();

        let json = std::fs::read_to_string(icon.with_file_name("Contents.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["images"][0]["filename"], "icon-1024.png");
        assert_eq!(parsed["images"][0]["size"], "64x64");
    }
}
