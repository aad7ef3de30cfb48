//! Tile extraction: optional rotation, cropping along located lines, and
//! output-format alpha handling. No file I/O happens here; persistence is an
//! external collaborator.

pub mod extract;
pub mod rotate;

pub use extract::{extract, extract_with, tile_file_name, OutputFormat, Tile};
pub use rotate::rotate_about_center;
