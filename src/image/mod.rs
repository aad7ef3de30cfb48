pub mod f32;
pub mod io;
pub mod rgba;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::rgba::ImageRgba8;
pub use self::traits::{ImageView, ImageViewMut, Rows};
