//! Grid layout request.

use crate::error::{Error, Result};
use crate::params::MAX_DIVISIONS;
use serde::Deserialize;

/// Caller-requested grid layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridSpec {
    /// Fixed row/column counts; separators at uniform fractions.
    Manual { rows: u32, cols: u32 },
    /// Locate separators from the edge map.
    Auto,
}

impl GridSpec {
    /// Reject out-of-range row/column counts before any pixel work.
    pub fn validate(&self) -> Result<()> {
        if let Self::Manual { rows, cols } = self {
            for (name, value) in [("rows", *rows), ("cols", *cols)] {
                if value == 0 || value > MAX_DIVISIONS {
                    return Err(Error::parameter(
                        name,
                        format!("must be within 1-{MAX_DIVISIONS}, got {value}"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Suggest a grid shape from the sheet aspect ratio.
///
/// Near-square sheets of reasonable size are usually 3×3 collages,
/// 2:1-ish sheets 2×2.
pub fn suggest_grid(width: usize, height: usize) -> GridSpec {
    if height == 0 {
        return GridSpec::Manual { rows: 2, cols: 2 };
    }
    let ratio = width as f32 / height as f32;
    if (0.9..=1.1).contains(&ratio) && width.min(height) >= 300 {
        GridSpec::Manual { rows: 3, cols: 3 }
    } else {
        GridSpec::Manual { rows: 2, cols: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_bounds_are_enforced() {
        assert!(GridSpec::Manual { rows: 1, cols: 1 }.validate().is_ok());
        assert!(GridSpec::Manual { rows: 18, cols: 18 }.validate().is_ok());
        assert!(GridSpec::Manual { rows: 19, cols: 2 }.validate().is_err());
        assert!(GridSpec::Manual { rows: 2, cols: 0 }.validate().is_err());
        assert!(GridSpec::Auto.validate().is_ok());
    }

    #[test]
    fn square_sheet_suggests_nine_grid() {
        assert_eq!(suggest_grid(600, 600), GridSpec::Manual { rows: 3, cols: 3 });
        assert_eq!(suggest_grid(400, 200), GridSpec::Manual { rows: 2, cols: 2 });
        // Too small for a 3×3 even when square.
        assert_eq!(suggest_grid(200, 200), GridSpec::Manual { rows: 2, cols: 2 });
    }
}
