//! Contents.json data model for the app icon set in an Xcode asset catalog
//!
//! Modern Xcode accepts a single 1024x1024 image for an iOS app icon and derives
//! every smaller size from it, so the catalog only ever needs one entry.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    /// Image entries, one per platform/appearance variant
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within an app icon set
#[derive(Serialize, Debug, Clone)]
pub struct ImageEntry {
    /// The filename of the image, relative to the icon set folder
    pub filename: String,

    /// The device type for the image (e.g., "universal", "iphone")
    pub idiom: String,

    /// The platform the entry targets (e.g., "ios")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// The size of the image in points (e.g., "1024x1024")
    pub size: String,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The format version of the asset catalog (always 1)
    pub version: u8,

    /// The application or tool that authored the asset catalog
    pub author: String,
}

impl ContentsFile {
    pub fn new(author: String) -> Self {
        Self {
            images: Vec::new(),
            info: Info { version: 1, author },
        }
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }
}

impl ImageEntry {
    /// Single-size iOS app icon entry for a square image `size` pixels across.
    pub fn single_size_ios(filename: String, size: u32) -> Self {
        Self {
            filename,
            idiom: "universal".to_string(),
            platform: Some("ios".to_string()),
            size: format!("{size}x{size}"),
        }
    }
}

/// Writes `Contents.json` into `dir`, replacing any existing file.
pub fn write_contents_json(dir: &Path, contents: &ContentsFile) -> Result<()> {
    let json =
        serde_json::to_string_pretty(contents).context("Failed to serialize Contents.json")?;
    std::fs::write(dir.join("Contents.json"), json).context("Failed to write Contents.json file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_file_creation() {
        let contents = ContentsFile::new("voiceit-icons".to_string());
        assert_eq!(contents.info.author, "voiceit-icons");
        assert_eq!(contents.info.version, 1);
        assert!(contents.images.is_empty());
    }

    #[test]
    fn test_single_size_entry_serialization() {
        let mut contents = ContentsFile::new("voiceit-icons".to_string());
        contents.add_image(ImageEntry::single_size_ios("icon-1024.png".to_string(), 1024));

        let json = serde_json::to_string_pretty(&contents).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("Generated JSON should be valid");

        let image = &parsed["images"][0];
        assert_eq!(parsed["images"].as_array().unwrap().len(), 1);
        assert_eq!(image["filename"], "icon-1024.png");
        assert_eq!(image["idiom"], "universal");
        assert_eq!(image["platform"], "ios");
        assert_eq!(image["size"], "1024x1024");
        assert_eq!(parsed["info"]["version"], 1);
        assert_eq!(parsed["info"]["author"], "voiceit-icons");
    }

    #[test]
    fn test_platform_is_omitted_when_unset() {
        let mut entry = ImageEntry::single_size_ios("a.png".to_string(), 512);
        entry.platform = None;

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("platform"));
        assert!(json.contains("\"size\":\"512x512\""));
    }

    #[test]
    fn test_write_contents_json() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut contents = ContentsFile::new("voiceit-icons".to_string());
        contents.add_image(ImageEntry::single_size_ios("icon-1024.png".to_string(), 1024));

        write_contents_json(temp_dir.path(), &contents).unwrap();

        let file_content =
            std::fs::read_to_string(temp_dir.path().join("Contents.json")).unwrap();
        assert!(file_content.contains("icon-1024.png"));
        assert!(file_content.contains("\"version\": 1"));
    }
}
