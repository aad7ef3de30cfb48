//! Cropping along located separator lines.

use super::rotate::rotate_about_center;
use crate::image::ImageRgba8;
use crate::types::DetectionResult;
use serde::Deserialize;

/// Export format requested for the extracted tiles.
///
/// Formats without alpha support get their tiles flattened against a white
/// background at extraction time so previews match the files on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless, keeps the alpha channel.
    #[default]
    Png,
    /// Smaller files, no transparency; alpha is flattened.
    Jpeg,
}

impl OutputFormat {
    pub fn keeps_alpha(&self) -> bool {
        matches!(self, Self::Png)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// One extracted cell with its grid position.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Zero-based row index, top to bottom.
    pub row: usize,
    /// Zero-based column index, left to right.
    pub col: usize,
    pub image: ImageRgba8,
}

/// Crop the (optionally rotated) sheet into row-major tiles.
///
/// `detection` must describe the rotated dimensions when `rotation_deg` is
/// non-zero; the pipeline guarantees this by locating lines on the rotated
/// image. Produces exactly `detection.tile_count()` tiles.
pub fn extract(
    image: &ImageRgba8,
    detection: &DetectionResult,
    rotation_deg: f32,
    format: OutputFormat,
) -> Vec<Tile> {
    extract_with(image, detection, rotation_deg, format, |_| true)
        .unwrap_or_default()
}

/// Like [`extract`], invoking `on_tile` with the sequence index after each
/// tile. Returns `None` when `on_tile` requests cancellation; no partial
/// tile list escapes in that case.
pub fn extract_with(
    image: &ImageRgba8,
    detection: &DetectionResult,
    rotation_deg: f32,
    format: OutputFormat,
    mut on_tile: impl FnMut(usize) -> bool,
) -> Option<Vec<Tile>> {
    let canvas = rotate_about_center(image, rotation_deg);
    let mut tiles = Vec::with_capacity(detection.tile_count());
    for (row, band) in detection.row_lines.windows(2).enumerate() {
        let (y0, y1) = (band[0] as usize, band[1] as usize);
        for (col, span) in detection.col_lines.windows(2).enumerate() {
            let (x0, x1) = (span[0] as usize, span[1] as usize);
            let mut cropped = canvas.crop(
                x0.min(canvas.w),
                y0.min(canvas.h),
                x1.min(canvas.w),
                y1.min(canvas.h),
            );
            if !format.keeps_alpha() {
                cropped = cropped.flatten_onto_white();
            }
            tiles.push(Tile {
                row,
                col,
                image: cropped,
            });
            if !on_tile(tiles.len() - 1) {
                return None;
            }
        }
    }
    Some(tiles)
}

/// Collision-free output name derived from the sequence index,
/// `{stem}_{index + 1}.{ext}`.
pub fn tile_file_name(stem: &str, index: usize, format: OutputFormat) -> String {
    format!("{stem}_{}.{}", index + 1, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_sheet(w: usize, h: usize) -> ImageRgba8 {
        let mut img = ImageRgba8::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, [x as u8, y as u8, 0, 255]);
            }
        }
        img
    }

    fn manual_result(w: u32, h: u32, rows: u32, cols: u32) -> DetectionResult {
        DetectionResult {
            row_lines: (0..=rows).map(|i| i * h / rows).collect(),
            col_lines: (0..=cols).map(|i| i * w / cols).collect(),
            confidence: 1.0,
        }
    }

    #[test]
    fn tiles_come_out_row_major_with_positions() {
        let sheet = gradient_sheet(8, 6);
        let tiles = extract(&sheet, &manual_result(8, 6, 2, 2), 0.0, OutputFormat::Png);
        assert_eq!(tiles.len(), 4);
        let order: Vec<(usize, usize)> = tiles.iter().map(|t| (t.row, t.col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(tiles[3].image.get(0, 0), [4, 3, 0, 255]);
    }

    #[test]
    fn single_cell_returns_full_image() {
        let sheet = gradient_sheet(5, 4);
        let tiles = extract(&sheet, &manual_result(5, 4, 1, 1), 0.0, OutputFormat::Png);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].image, sheet);
    }

    #[test]
    fn tile_sizes_reconstruct_the_sheet() {
        let sheet = gradient_sheet(103, 57);
        let detection = manual_result(103, 57, 3, 4);
        let tiles = extract(&sheet, &detection, 0.0, OutputFormat::Png);
        let top_row_width: usize = tiles.iter().filter(|t| t.row == 0).map(|t| t.image.w).sum();
        assert_eq!(top_row_width, 103);
        let left_col_height: usize =
            tiles.iter().filter(|t| t.col == 0).map(|t| t.image.h).sum();
        assert_eq!(left_col_height, 57);
    }

    #[test]
    fn jpeg_tiles_are_flattened_opaque() {
        let mut sheet = ImageRgba8::new(4, 4);
        sheet.data.fill([10, 20, 30, 128]);
        let tiles = extract(&sheet, &manual_result(4, 4, 2, 2), 0.0, OutputFormat::Jpeg);
        assert!(tiles
            .iter()
            .all(|t| t.image.data.iter().all(|px| px[3] == 255)));
    }

    #[test]
    fn names_follow_sequence_index() {
        assert_eq!(tile_file_name("sheet", 0, OutputFormat::Png), "sheet_1.png");
        assert_eq!(tile_file_name("sheet", 8, OutputFormat::Jpeg), "sheet_9.jpg");
    }
}
