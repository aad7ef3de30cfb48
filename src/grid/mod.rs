//! Grid-line location: reduce an edge map to ordered separator coordinates.
//!
//! Manual grids are placed at uniform fractions. Auto mode projects the edge
//! map onto each axis, smooths the density profile and accepts local maxima
//! under prominence and anti-crowding rules; when nothing clears the bar the
//! locator degrades to a uniform grid with zero confidence instead of
//! failing.

pub mod locator;
pub mod profile;
pub mod spec;

pub use locator::locate;
pub use spec::{suggest_grid, GridSpec};
