//! I/O helpers for frames and JSON.
//!
//! - `load_frame`: read a PNG/JPEG/etc. into an owned RGB `Frame`.
//! - `save_frame`: write a `Frame` (typically a fretboard crop) to disk.
//! - `save_gray`: write an owned 8-bit gray buffer, e.g. an edge mask dump.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Frame, GrayImageU8, ImageView};
use ::image::{DynamicImage, GrayImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to an 8-bit RGB frame.
pub fn load_frame(path: &Path) -> Result<Frame, String> {
    let img = ::image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    Frame::from_rgb_image(img).map_err(|e| format!("Failed to load {}: {e}", path.display()))
}

/// Save a frame; the format follows the file extension.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    DynamicImage::ImageRgb8(frame.to_rgb_image())
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_gray(buffer: &GrayImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image = GrayImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.data().to_vec(),
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    DynamicImage::ImageLuma8(image)
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

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
