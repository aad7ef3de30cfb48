//! Binary edge mask, one byte per pixel.

/// Edge classification mask matching the source image dimensions.
/// `1` marks an edge pixel, `0` background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMap {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl EdgeMap {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        self.data[y * self.w + x] = 1;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.w..(y + 1) * self.w]
    }

    /// Merge another mask into this one with logical OR.
    ///
    /// Both maps must come from the same source image.
    pub fn or_with(&mut self, other: &EdgeMap) {
        debug_assert_eq!(self.w, other.w);
        debug_assert_eq!(self.h, other.h);
        for (dst, &src) in self.data.iter_mut().zip(&other.data) {
            *dst |= src;
        }
    }

    /// Number of edge pixels in the whole mask.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Binarize a float response against a threshold.
    pub fn from_threshold(response: &crate::image::ImageF32, threshold: f32) -> Self {
        let mut out = Self::new(response.w, response.h);
        for (dst, &v) in out.data.iter_mut().zip(&response.data) {
            *dst = (v > threshold) as u8;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageF32;

    #[test]
    fn threshold_binarizes_strictly_above() {
        let mut img = ImageF32::new(3, 1);
        img.data.copy_from_slice(&[1.0, 5.0, 10.0]);
        let map = EdgeMap::from_threshold(&img, 5.0);
        assert_eq!(map.data, vec![0, 0, 1]);
    }

    #[test]
    fn or_merges_masks() {
        let mut a = EdgeMap::new(2, 1);
        a.set(0, 0);
        let mut b = EdgeMap::new(2, 1);
        b.set(1, 0);
        a.or_with(&b);
        assert_eq!(a.count(), 2);
    }
}
