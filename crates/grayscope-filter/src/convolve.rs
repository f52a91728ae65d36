//! Convolution operations
//!
//! One loop serves every kernel. Taps that fall outside the image are
//! skipped, sums are accumulated in `i64`, and the result is narrowed to
//! 8 bits through a [`RangePolicy`].
//!
//! Non-negative (smoothing) kernels are divided by their full weight sum,
//! even at the border where some taps were skipped, so borders come out
//! darker than the interior. Kernels with negative weights are not divided.

use crate::kernel::KernelSource;
use crate::{FilterError, FilterResult, catalog};
use grayscope_core::{PixelBuffer, PixelBufferMut, clamp_level};

/// How raw responses are narrowed to `[0, 255]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Clamp each level independently
    #[default]
    Clamp,
    /// Add `|min|` of the whole response to every level, then clamp
    Rescale,
}

impl RangePolicy {
    /// Narrow a full response buffer according to this policy.
    pub(crate) fn narrow(self, template: &PixelBuffer, levels: &[i64]) -> PixelBuffer {
        let shift = match self {
            RangePolicy::Clamp => 0,
            RangePolicy::Rescale => levels.iter().copied().min().unwrap_or(0).abs(),
        };
        let mut out = PixelBufferMut::new_like(template);
        for (dst, &level) in out.data_mut().iter_mut().zip(levels) {
            *dst = clamp_level(level + shift);
        }
        out.into()
    }
}

/// Convolve with the default [`RangePolicy::Clamp`].
pub fn convolve<K: KernelSource + ?Sized>(
    buf: &PixelBuffer,
    kernel: &K,
) -> FilterResult<PixelBuffer> {
    convolve_with(buf, kernel, RangePolicy::Clamp)
}

/// Convolve and narrow with the given policy.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] for a kernel that fails
/// [`KernelSource::validate`], or for a non-negative kernel whose weights
/// sum to zero.
pub fn convolve_with<K: KernelSource + ?Sized>(
    buf: &PixelBuffer,
    kernel: &K,
    policy: RangePolicy,
) -> FilterResult<PixelBuffer> {
    let levels = response(buf, kernel)?;
    Ok(policy.narrow(buf, &levels))
}

/// Raw per-pixel response, row-major, after the smoothing division.
pub(crate) fn response<K: KernelSource + ?Sized>(
    buf: &PixelBuffer,
    kernel: &K,
) -> FilterResult<Vec<i64>> {
    kernel.validate()?;

    let divisor = if kernel.is_non_negative() {
        match kernel.weight_sum() {
            0 => {
                return Err(FilterError::InvalidKernel(
                    "smoothing kernel weights sum to zero".to_string(),
                ));
            }
            sum => Some(sum),
        }
    } else {
        None
    };

    let (cx, cy) = kernel.center();
    let taps: Vec<(i64, i64, i64)> = kernel
        .taps()
        .filter(|&(_, _, w)| w != 0)
        .map(|(i, j, w)| (i as i64 - cx as i64, j as i64 - cy as i64, w as i64))
        .collect();

    let mut levels = Vec::with_capacity(buf.pixel_count());
    for y in 0..buf.height() as i64 {
        for x in 0..buf.width() as i64 {
            let sum: i64 = taps
                .iter()
                .filter_map(|&(dx, dy, w)| buf.get_signed(x + dx, y + dy).map(|v| w * v as i64))
                .sum();
            levels.push(match divisor {
                Some(d) => sum / d,
                None => sum,
            });
        }
    }
    Ok(levels)
}

/// Apply a smoothing kernel.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if the kernel has a negative
/// weight.
pub fn smooth<K: KernelSource + ?Sized>(
    buf: &PixelBuffer,
    kernel: &K,
) -> FilterResult<PixelBuffer> {
    kernel.validate()?;
    if !kernel.is_non_negative() {
        return Err(FilterError::InvalidParameters(
            "smoothing requires a kernel without negative weights".to_string(),
        ));
    }
    convolve(buf, kernel)
}

/// Smooth with the 3x3 or 5x5 Gaussian (sigma = 1) from the catalog.
pub fn gaussian_smooth(buf: &PixelBuffer, size: u32) -> FilterResult<PixelBuffer> {
    let kernel = match size {
        3 => &catalog::GAUSSIAN_3X3,
        5 => &catalog::GAUSSIAN_5X5,
        _ => {
            return Err(FilterError::InvalidParameters(format!(
                "Gaussian kernel size must be 3 or 5, got {size}"
            )));
        }
    };
    smooth(buf, kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kernel;
    use crate::catalog::{LAPLACIAN_2, SOBEL_1, UNIFORM_3X3, UNIFORM_5X5};

    #[test]
    fn test_uniform_on_tiny_buffer() {
        let buf = PixelBuffer::from_rows(&[[0u8, 85], [170, 255]]).unwrap();
        let out = convolve(&buf, &UNIFORM_3X3).unwrap();
        // every window covers all four samples: 510 / 9
        assert!(out.data().iter().all(|&v| v == 56));
    }

    #[test]
    fn test_uniform_interior_preserved() {
        let buf = PixelBuffer::filled(9, 7, 120).unwrap();
        let out = convolve(&buf, &UNIFORM_5X5).unwrap();
        for y in 2..5 {
            for x in 2..7 {
                assert_eq!(out.get(x, y), Some(120));
            }
        }
        // corner window sees 9 of 25 taps
        assert_eq!(out.get(0, 0), Some((120 * 9 / 25) as u8));
    }

    #[test]
    fn test_output_shape_matches() {
        let buf = PixelBuffer::new(4, 11).unwrap();
        let out = convolve(&buf, &UNIFORM_5X5).unwrap();
        assert_eq!(out.dimensions(), (4, 11));
    }

    #[test]
    fn test_signed_kernel_not_divided() {
        let buf = PixelBuffer::from_rows(&[[0u8, 0, 0], [0, 10, 0], [0, 0, 0]]).unwrap();
        let out = convolve(&buf, &LAPLACIAN_2).unwrap();
        // center: -8 * 10 clamps to 0, neighbors see +10
        assert_eq!(out.get(1, 1), Some(0));
        assert_eq!(out.get(0, 0), Some(10));
        assert_eq!(out.get(2, 1), Some(10));
    }

    #[test]
    fn test_rescale_policy_shifts_by_min() {
        let buf = PixelBuffer::from_rows(&[[0u8, 0, 0], [0, 10, 0], [0, 0, 0]]).unwrap();
        let out = convolve_with(&buf, &LAPLACIAN_2, RangePolicy::Rescale).unwrap();
        // min response is -80
        assert_eq!(out.get(1, 1), Some(0));
        assert_eq!(out.get(0, 0), Some(90));
    }

    #[test]
    fn test_sobel_responds_to_vertical_edge() {
        let buf = PixelBuffer::from_fn(6, 4, |x, _| if x < 3 { 0 } else { 50 }).unwrap();
        let out = convolve(&buf, &SOBEL_1).unwrap();
        assert_eq!(out.get(3, 1), Some(200));
        assert_eq!(out.get(0, 1), Some(0));
    }

    #[test]
    fn test_zero_sum_smoothing_kernel_rejected() {
        let k = Kernel::from_columns(3, 3, vec![0; 9]).unwrap();
        let buf = PixelBuffer::new(3, 3).unwrap();
        assert!(matches!(
            convolve(&buf, &k),
            Err(FilterError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_smooth_rejects_signed_kernel() {
        let buf = PixelBuffer::new(3, 3).unwrap();
        assert!(matches!(
            smooth(&buf, &LAPLACIAN_2),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_gaussian_smooth_sizes() {
        let buf = PixelBuffer::filled(7, 7, 200).unwrap();
        assert_eq!(gaussian_smooth(&buf, 3).unwrap().get(3, 3), Some(200));
        assert_eq!(gaussian_smooth(&buf, 5).unwrap().get(3, 3), Some(200));
        assert!(gaussian_smooth(&buf, 7).is_err());
    }
}
