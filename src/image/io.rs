//! File I/O for sheets, tiles and JSON reports.
//!
//! - `load_rgba_image`: read a PNG/JPEG/etc. into an owned RGBA buffer.
//! - `save_rgba_image`: write a buffer in the requested output format.
//! - `save_tiles`: persist a tile list, reporting failures per file.
//! - `write_json_file`: pretty-print a serializable value to disk.

use super::ImageRgba8;
use crate::error::{Error, Result};
use crate::tiles::{tile_file_name, OutputFormat, Tile};
use image::{RgbImage, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an image from disk and convert to 8-bit RGBA.
pub fn load_rgba_image(path: &Path) -> Result<ImageRgba8> {
    let img = image::open(path)
        .map_err(|e| Error::io(path.display().to_string(), e))?
        .into_rgba8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    ImageRgba8::from_raw(w, h, img.as_raw())
        .ok_or_else(|| Error::input(format!("decoded buffer size mismatch for {}", path.display())))
}

/// Save a buffer to `path` in the given format.
///
/// JPEG has no alpha channel, so that branch drops it; the extractor has
/// already flattened JPEG tiles against white.
pub fn save_rgba_image(image: &ImageRgba8, path: &Path, format: OutputFormat) -> Result<()> {
    ensure_parent_dir(path)?;
    let (w, h) = (image.w as u32, image.h as u32);
    let result = match format {
        OutputFormat::Png => {
            let bytes: Vec<u8> = image.data.iter().flat_map(|px| px.iter().copied()).collect();
            RgbaImage::from_raw(w, h, bytes)
                .ok_or_else(|| Error::input("pixel buffer does not match dimensions"))?
                .save(path)
        }
        OutputFormat::Jpeg => {
            let bytes: Vec<u8> = image
                .data
                .iter()
                .flat_map(|px| px[..3].iter().copied())
                .collect();
            RgbImage::from_raw(w, h, bytes)
                .ok_or_else(|| Error::input("pixel buffer does not match dimensions"))?
                .save(path)
        }
    };
    result.map_err(|e| Error::io(path.display().to_string(), e))
}

/// Write every tile under `dir` as `{stem}_{n}.{ext}`.
///
/// One failed write does not stop the rest; each entry of the returned
/// vector reports the written path or the per-file error, in tile order.
pub fn save_tiles(
    tiles: &[Tile],
    dir: &Path,
    stem: &str,
    format: OutputFormat,
) -> Vec<Result<PathBuf>> {
    tiles
        .iter()
        .enumerate()
        .map(|(i, tile)| {
            let path = dir.join(tile_file_name(stem, i, format));
            save_rgba_image(&tile.image, &path, format).map(|()| path)
        })
        .collect()
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::io(path.display().to_string(), e))?;
    fs::write(path, json).map_err(|e| Error::io(path.display().to_string(), e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent.display().to_string(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("sheet-splitter-io-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn gradient(w: usize, h: usize) -> ImageRgba8 {
        let mut img = ImageRgba8::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, [x as u8 * 10, y as u8 * 10, 0, 255]);
            }
        }
        img
    }

    #[test]
    fn png_round_trip_preserves_pixels() {
        let dir = scratch_dir("roundtrip");
        let path = dir.join("sheet.png");
        let img = gradient(6, 4);
        save_rgba_image(&img, &path, OutputFormat::Png).unwrap();
        let loaded = load_rgba_image(&path).unwrap();
        assert_eq!(loaded, img);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_rgba_image(Path::new("/nonexistent/sheet.png")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn tiles_are_written_with_sequence_names() {
        let dir = scratch_dir("tiles");
        let tiles = vec![
            Tile { row: 0, col: 0, image: gradient(3, 3) },
            Tile { row: 0, col: 1, image: gradient(3, 3) },
        ];
        let written = save_tiles(&tiles, &dir, "sheet", OutputFormat::Png);
        assert_eq!(written.len(), 2);
        let paths: Vec<PathBuf> = written.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(paths[0].file_name().unwrap(), "sheet_1.png");
        assert_eq!(paths[1].file_name().unwrap(), "sheet_2.png");
        assert!(paths.iter().all(|p| p.exists()));
        fs::remove_dir_all(&dir).ok();
    }
}
