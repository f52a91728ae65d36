//! Sharpening: image arithmetic, Laplacian and gradient masks
//!
//! A sharpening pipeline builds a mask (a Laplacian response, or the
//! difference between an image and its blur) and adds a multiple of it
//! back onto the original with [`add_mask`]. Unsharp masking uses the 5x5
//! Gaussian from the catalog; a multiplier above 1 gives highboost
//! filtering.

use crate::catalog::{self, CatalogKernel};
use crate::convolve::{RangePolicy, convolve, convolve_with, response};
use crate::kernel::KernelSource;
use crate::{FilterError, FilterResult};
use grayscope_core::{MAX_INTENSITY, PixelBuffer, PixelBufferMut, clamp_level};

/// How negative differences are handled by [`subtract`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtractPolicy {
    /// Negative differences become 0
    #[default]
    Plain,
    /// Shift every difference by `|min|`, then clamp
    Scaled,
}

impl SubtractPolicy {
    fn range_policy(self) -> RangePolicy {
        match self {
            SubtractPolicy::Plain => RangePolicy::Clamp,
            SubtractPolicy::Scaled => RangePolicy::Rescale,
        }
    }
}

/// Pixel-wise difference `a - b`.
///
/// # Errors
///
/// Returns a dimension mismatch if the buffers differ in size.
pub fn subtract(
    a: &PixelBuffer,
    b: &PixelBuffer,
    policy: SubtractPolicy,
) -> FilterResult<PixelBuffer> {
    a.check_same_size(b)?;
    let diffs: Vec<i64> = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| x as i64 - y as i64)
        .collect();
    Ok(policy.range_policy().narrow(a, &diffs))
}

/// Add `k` times `mask` to `base`: `trunc(base + k * mask)`, clamped.
///
/// # Errors
///
/// Returns a dimension mismatch if the buffers differ in size, or
/// [`FilterError::InvalidParameters`] if `k` is not finite.
pub fn add_mask(base: &PixelBuffer, mask: &PixelBuffer, k: f64) -> FilterResult<PixelBuffer> {
    if !k.is_finite() {
        return Err(FilterError::InvalidParameters(format!(
            "mask multiplier must be finite, got {k}"
        )));
    }
    base.check_same_size(mask)?;

    let mut out = PixelBufferMut::new_like(base);
    for ((dst, &b), &m) in out.data_mut().iter_mut().zip(base.data()).zip(mask.data()) {
        let level = b as f64 + k * m as f64;
        *dst = level.clamp(0.0, MAX_INTENSITY as f64) as u8;
    }
    Ok(out.into())
}

/// Laplacian response of a buffer, narrowed with `policy`.
pub fn laplacian<K: KernelSource + ?Sized>(
    buf: &PixelBuffer,
    kernel: &K,
    policy: RangePolicy,
) -> FilterResult<PixelBuffer> {
    convolve_with(buf, kernel, policy)
}

/// Add `k` times the Laplacian response back onto the buffer.
///
/// Kernels with a negative center weight call for a negative `k`.
pub fn laplacian_sharpen<K: KernelSource + ?Sized>(
    buf: &PixelBuffer,
    kernel: &K,
    policy: RangePolicy,
    k: f64,
) -> FilterResult<PixelBuffer> {
    let mask = laplacian(buf, kernel, policy)?;
    add_mask(buf, &mask, k)
}

/// Unsharp masking (`k = 1`) and highboost filtering (`k > 1`).
///
/// Blurs with the 5x5 Gaussian, subtracts the blur from the original and
/// adds `k` times that mask back.
pub fn unsharp_mask(
    buf: &PixelBuffer,
    k: f64,
    policy: SubtractPolicy,
) -> FilterResult<PixelBuffer> {
    let blurred = convolve(buf, &catalog::GAUSSIAN_5X5)?;
    let mask = subtract(buf, &blurred, policy)?;
    add_mask(buf, &mask, k)
}

/// First-derivative operators from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientOperator {
    /// Sobel, changes along x
    Sobel1,
    /// Sobel, changes along y
    Sobel2,
    /// Roberts cross, main diagonal
    Roberts1,
    /// Roberts cross, anti-diagonal
    Roberts2,
}

impl GradientOperator {
    /// The catalog kernel of this operator.
    pub fn kernel(self) -> &'static CatalogKernel {
        match self {
            GradientOperator::Sobel1 => &catalog::SOBEL_1,
            GradientOperator::Sobel2 => &catalog::SOBEL_2,
            GradientOperator::Roberts1 => &catalog::ROBERTS_1,
            GradientOperator::Roberts2 => &catalog::ROBERTS_2,
        }
    }
}

/// Orthogonal operator pairs for [`gradient_magnitude`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientPair {
    /// Both Sobel operators
    #[default]
    Sobel,
    /// Both Roberts cross operators
    Roberts,
}

impl GradientPair {
    /// The two operators of this pair.
    pub fn operators(self) -> (GradientOperator, GradientOperator) {
        match self {
            GradientPair::Sobel => (GradientOperator::Sobel1, GradientOperator::Sobel2),
            GradientPair::Roberts => (GradientOperator::Roberts1, GradientOperator::Roberts2),
        }
    }
}

/// Response of a single gradient operator, narrowed with `policy`.
pub fn gradient(
    buf: &PixelBuffer,
    operator: GradientOperator,
    policy: RangePolicy,
) -> FilterResult<PixelBuffer> {
    convolve_with(buf, operator.kernel(), policy)
}

/// Gradient magnitude approximation `min(255, |gx| + |gy|)`.
///
/// Uses the signed responses of both operators before any narrowing.
pub fn gradient_magnitude(buf: &PixelBuffer, pair: GradientPair) -> FilterResult<PixelBuffer> {
    let (op_x, op_y) = pair.operators();
    let gx = response(buf, op_x.kernel())?;
    let gy = response(buf, op_y.kernel())?;

    let mut out = PixelBufferMut::new_like(buf);
    for ((dst, x), y) in out.data_mut().iter_mut().zip(gx).zip(gy) {
        *dst = clamp_level(x.abs() + y.abs());
    }
    Ok(out.into())
}
