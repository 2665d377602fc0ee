//! I/O helpers for color images and JSON.
//!
//! - `load_color_image`: read a PNG/JPEG/etc. into an owned RGB buffer.
//! - `save_rgb`: write an RGB buffer, creating parent directories.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::CardError;
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to 8-bit RGB.
///
/// Unreadable files and images without pixels are [`CardError::EmptyInput`].
pub fn load_color_image(path: &Path) -> Result<RgbImage, CardError> {
    let img = image::open(path)
        .map_err(|e| CardError::EmptyInput(format!("failed to open {}: {e}", path.display())))?
        .into_rgb8();
    if img.width() == 0 || img.height() == 0 {
        return Err(CardError::EmptyInput(format!(
            "{} has no pixels",
            path.display()
        )));
    }
    Ok(img)
}

/// Save an RGB buffer; the format follows the file extension.
pub fn save_rgb(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("card_detector_io_{name}_{}", std::process::id()))
    }

    #[test]
    fn png_round_trip_through_nested_dir() {
        let dir = scratch_dir("png");
        let path = dir.join("nested/card.png");
        let img = RgbImage::from_fn(7, 5, |x, y| Rgb([x as u8 * 30, y as u8 * 40, 9]));
        save_rgb(&img, &path).unwrap();
        let back = load_color_image(&path).unwrap();
        assert_eq!(back, img);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_file_is_empty_input() {
        let err = load_color_image(Path::new("/nonexistent/frame.png")).unwrap_err();
        assert!(matches!(err, CardError::EmptyInput(_)));
    }

    #[test]
    fn json_is_pretty_printed() {
        let dir = scratch_dir("json");
        let path = dir.join("report.json");
        write_json_file(&path, &serde_json::json!({"found": true})).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"found\": true"));
        let _ = fs::remove_dir_all(dir);
    }
}
