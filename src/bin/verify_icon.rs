use anyhow::{Context, Result};
use image::io::Reader as ImageReader;
use voiceit_icons::inspect::{mirror_deviation, row_average};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "VoiceIt/Icons/Calculator@2x.png".to_string());

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open {path}"))?
        .decode()
        .context("Failed to decode image")?;

    println!("Checking icon: {}", path);
    println!("Image dimensions: {}x{}", img.width(), img.height());
    println!("Color type: {:?}", img.color());

    let rgba_img = img.to_rgba8();
    let [tr, tg, tb] = row_average(&rgba_img, 0);
    let [br, bg, bb] = row_average(&rgba_img, rgba_img.height().saturating_sub(1));
    println!("\nGradient:");
    println!("  top row average:    ({tr:.1}, {tg:.1}, {tb:.1})");
    println!("  bottom row average: ({br:.1}, {bg:.1}, {bb:.1})");

    let deviation = mirror_deviation(&rgba_img);
    println!("\nMirror symmetry:");
    println!("  max channel difference:  {}", deviation.max);
    println!("  mean channel difference: {:.3}", deviation.mean);

    if deviation.mean < 1.0 {
        println!("✓ Glyph is symmetric about the vertical center line");
    } else {
        println!("⚠ Glyph is not mirror-symmetric (expected for Notes)");
    }

    Ok(())
}
