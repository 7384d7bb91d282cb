//! I/O helpers for grayscale images and JSON.
//!
//! - `load_grayscale_grid`: read a PNG/JPEG/etc. into a 2-D `ScalarGrid` with
//!   intensities scaled to `[0, 1]`.
//! - `save_grayscale_grid`: write a 2-D `ScalarGrid` to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::grid::{GridShape, ScalarGrid};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Build a 2-D grid from 8-bit luma samples (row-major, tightly packed).
pub fn grid_from_luma(width: usize, height: usize, data: &[u8]) -> Result<ScalarGrid, String> {
    let samples = data.iter().map(|&v| f32::from(v) / 255.0).collect();
    ScalarGrid::from_vec(GridShape::image(width, height), samples).map_err(|e| e.to_string())
}

/// Load an image from disk, convert to 8-bit grayscale and scale to `[0, 1]`.
pub fn load_grayscale_grid(path: &Path) -> Result<ScalarGrid, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    grid_from_luma(width, height, img.as_raw())
}

/// Quantize a 2-D grid to 8 bits, clamping values to `[0, 1]`.
pub fn grid_to_luma(grid: &ScalarGrid) -> Result<GrayImage, String> {
    let dims = grid.shape().dims();
    let [w, h] = dims else {
        return Err(format!("Expected a 2-D grid, got dims {dims:?}"));
    };
    let mut out = GrayImage::new(*w as u32, *h as u32);
    for (i, &px) in grid.as_slice().iter().enumerate() {
        let v = (px * 255.0).round().clamp(0.0, 255.0);
        out.put_pixel((i % w) as u32, (i / w) as u32, Luma([v as u8]));
    }
    Ok(out)
}

/// Save a 2-D grid to a grayscale PNG.
pub fn save_grayscale_grid(grid: &ScalarGrid, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    grid_to_luma(grid)?
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
