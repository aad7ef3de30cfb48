use sheet_splitter::image::ImageRgba8;

/// Uniform light sheet with a dark solid separator cross at the midpoints.
pub fn cross_sheet(width: usize, height: usize, line_width: usize) -> ImageRgba8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(line_width > 0, "separator width must be positive");

    let x0 = width / 2 - line_width / 2;
    let y0 = height / 2 - line_width / 2;
    let mut img = flat_sheet(width, height, 235);
    for y in 0..height {
        for x in 0..width {
            if (x0..x0 + line_width).contains(&x) || (y0..y0 + line_width).contains(&y) {
                img.set(x, y, [15, 15, 15, 255]);
            }
        }
    }
    img
}

/// Uniform sheet of a single shade, fully opaque.
pub fn flat_sheet(width: usize, height: usize, shade: u8) -> ImageRgba8 {
    let mut img = ImageRgba8::new(width, height);
    img.data.fill([shade, shade, shade, 255]);
    img
}

/// Blend every channel toward mid-gray; `factor` 1.0 leaves the image
/// unchanged, 0.5 halves the contrast.
pub fn reduce_contrast(img: &mut ImageRgba8, factor: f32) {
    for px in &mut img.data {
        for c in px.iter_mut().take(3) {
            *c = (128.0 + (*c as f32 - 128.0) * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Add deterministic pseudo-random noise in `[-amplitude, amplitude]`.
pub fn add_noise(img: &mut ImageRgba8, amplitude: i16, seed: u32) {
    let mut state = seed.max(1);
    let span = (2 * amplitude + 1) as u32;
    for px in &mut img.data {
        // xorshift32; good enough for repeatable test fixtures.
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let delta = (state % span) as i16 - amplitude;
        for c in px.iter_mut().take(3) {
            *c = (*c as i16 + delta).clamp(0, 255) as u8;
        }
    }
}
