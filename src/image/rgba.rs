//! Owned 8-bit RGBA image used for sheet input and extracted tiles.
//!
//! The detection stages never touch colour data; this buffer exists so the
//! extractor can crop and rotate the original pixels while the numeric
//! pipeline works on the grayscale projection.

use super::ImageF32;

/// Row-major RGBA buffer, one `[r, g, b, a]` pixel per element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRgba8 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<[u8; 4]>,
}

impl ImageRgba8 {
    /// Construct a fully transparent buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![[0; 4]; w * h],
        }
    }

    /// Wrap raw interleaved RGBA bytes. Returns `None` when the byte count
    /// does not match `w * h * 4`.
    pub fn from_raw(w: usize, h: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != w * h * 4 {
            return None;
        }
        let data = bytes
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Some(Self { w, h, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: [u8; 4]) {
        self.data[y * self.w + x] = px;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[[u8; 4]] {
        &self.data[y * self.w..(y + 1) * self.w]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [[u8; 4]] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }

    /// Project to a float grayscale image on the 0–255 scale using the
    /// Rec. 601 luma weights.
    pub fn to_luma_f32(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for (dst, px) in out.data.iter_mut().zip(&self.data) {
            *dst = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
        }
        out
    }

    /// Copy the rectangle `[x0, x1) × [y0, y1)` into a new buffer.
    ///
    /// Callers must pass a rectangle inside the image; the pipeline only
    /// crops along validated line coordinates.
    pub fn crop(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        debug_assert!(x0 <= x1 && x1 <= self.w);
        debug_assert!(y0 <= y1 && y1 <= self.h);
        let mut out = Self::new(x1 - x0, y1 - y0);
        for (dy, y) in (y0..y1).enumerate() {
            out.row_mut(dy).copy_from_slice(&self.row(y)[x0..x1]);
        }
        out
    }

    /// Flatten the alpha channel against a white background (for formats
    /// without transparency support).
    pub fn flatten_onto_white(&self) -> Self {
        let mut out = self.clone();
        for px in &mut out.data {
            let a = px[3] as u16;
            for c in px.iter_mut().take(3) {
                *c = ((*c as u16 * a + 255 * (255 - a) + 127) / 255) as u8;
            }
            px[3] = 255;
        }
        out
    }
}
