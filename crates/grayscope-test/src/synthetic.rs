//! Synthetic test images
//!
//! Small deterministic buffers so that regression tests need no image files.

use grayscope_core::PixelBuffer;

/// A buffer with every sample set to `value`.
///
/// # Panics
///
/// Panics if a dimension is zero.
pub fn uniform(width: u32, height: u32, value: u8) -> PixelBuffer {
    PixelBuffer::filled(width, height, value).expect("image dimensions must be positive")
}

/// A left-to-right ramp spanning the full 0..=255 range.
pub fn horizontal_gradient(width: u32, height: u32) -> PixelBuffer {
    let span = width.saturating_sub(1).max(1);
    PixelBuffer::from_fn(width, height, |x, _| (x * 255 / span) as u8)
        .expect("image dimensions must be positive")
}

/// A diagonal ramp, `(x + y) * step` wrapped to 8 bits.
pub fn diagonal_ramp(width: u32, height: u32, step: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| ((x + y) * step % 256) as u8)
        .expect("image dimensions must be positive")
}

/// A high-contrast checkerboard alternating 32 and 220.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> PixelBuffer {
    assert!(cell > 0, "cell size must be positive");
    PixelBuffer::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) & 1 == 0 { 32 } else { 220 }
    })
    .expect("image dimensions must be positive")
}

/// A dark background with a bright centered square of side `side`.
pub fn centered_square(width: u32, height: u32, side: u32, bg: u8, fg: u8) -> PixelBuffer {
    let x0 = width.saturating_sub(side) / 2;
    let y0 = height.saturating_sub(side) / 2;
    PixelBuffer::from_fn(width, height, |x, y| {
        if (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y) {
            fg
        } else {
            bg
        }
    })
    .expect("image dimensions must be positive")
}
