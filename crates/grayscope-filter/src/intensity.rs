//! Point-wise intensity transformations
//!
//! Log and power-law curves, bit-plane slicing and intensity-level
//! reduction. Each output sample depends only on the input sample at the
//! same position (plus, for the curves, one buffer-wide divisor).

use crate::{FilterError, FilterResult};
use grayscope_core::{GRAY_LEVELS, PixelBuffer, PixelBufferMut, clamp_level, level_divisor};

/// Divide every level by `divisor` when it is non-zero, then clamp.
fn rescale(template: &PixelBuffer, levels: &[i64], divisor: i64) -> PixelBuffer {
    let mut out = PixelBufferMut::new_like(template);
    for (dst, &level) in out.data_mut().iter_mut().zip(levels) {
        let level = if divisor != 0 { level / divisor } else { level };
        *dst = clamp_level(level);
    }
    out.into()
}

/// Log transformation, `c * ln(1 + r)`.
///
/// Levels are truncated to integers. The divisor is the transformed level
/// of pixel (0, 0) divided by 256; when it is non-zero every level is
/// divided by it, and the result is clamped to `[0, 255]`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `c` is not finite.
pub fn log_transform(buf: &PixelBuffer, c: f64) -> FilterResult<PixelBuffer> {
    if !c.is_finite() {
        return Err(FilterError::InvalidParameters(format!(
            "log constant must be finite, got {c}"
        )));
    }

    let levels: Vec<i64> = buf
        .data()
        .iter()
        .map(|&r| (c * (1.0 + r as f64).ln()) as i64)
        .collect();
    let divisor = levels[0] / GRAY_LEVELS as i64;
    Ok(rescale(buf, &levels, divisor))
}

/// Power-law transformation, `(c * ln(1 + r))^gamma`.
///
/// The divisor is the largest transformed level divided by 256, so
/// responses that overshoot the 8-bit range are compressed back into it.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless `c` and `gamma` are
/// finite and strictly positive.
pub fn power_law_transform(buf: &PixelBuffer, c: f64, gamma: f64) -> FilterResult<PixelBuffer> {
    if !(c.is_finite() && c > 0.0) || !(gamma.is_finite() && gamma > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "constant and gamma must be greater than 0, got {c} and {gamma}"
        )));
    }

    let levels: Vec<i64> = buf
        .data()
        .iter()
        .map(|&r| (c * (1.0 + r as f64).ln()).powf(gamma) as i64)
        .collect();
    let max = levels.iter().copied().max().unwrap_or(0);
    Ok(rescale(buf, &levels, max / GRAY_LEVELS as i64))
}

/// Gamma correction; same as [`power_law_transform`].
pub fn gamma_transform(buf: &PixelBuffer, c: f64, gamma: f64) -> FilterResult<PixelBuffer> {
    power_law_transform(buf, c, gamma)
}

/// Clear the `bits` least significant bits of every sample.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless `1 <= bits <= 7`.
pub fn slice_low_bits(buf: &PixelBuffer, bits: u32) -> FilterResult<PixelBuffer> {
    if !(1..=7).contains(&bits) {
        return Err(FilterError::InvalidParameters(format!(
            "number of bits must be between 1 and 7, got {bits}"
        )));
    }
    let mask = 0xFFu8 << bits;
    Ok(buf.map(|v| v & mask))
}

/// Clear bit `bit` (0 = least significant) of every sample.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless `bit <= 7`.
pub fn clear_bit(buf: &PixelBuffer, bit: u32) -> FilterResult<PixelBuffer> {
    if bit > 7 {
        return Err(FilterError::InvalidParameters(format!(
            "bit number must be between 0 and 7, got {bit}"
        )));
    }
    let mask = !(1u8 << bit);
    Ok(buf.map(|v| v & mask))
}

/// Fold the 256 intensities into `level_count` levels.
///
/// Every sample is divided by `256 / level_count + 1`, so the output
/// uses levels `0..level_count`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless
/// `1 <= level_count <= 256`.
pub fn reduce_levels(buf: &PixelBuffer, level_count: u32) -> FilterResult<PixelBuffer> {
    let divisor = level_divisor(level_count).map_err(|_| {
        FilterError::InvalidParameters(format!(
            "level count must be between 1 and {GRAY_LEVELS}, got {level_count}"
        ))
    })?;
    Ok(buf.map(|v| (v as u32 / divisor) as u8))
}
