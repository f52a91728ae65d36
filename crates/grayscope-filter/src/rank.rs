//! Rank (order-statistic) filtering
//!
//! For each pixel the window covers offsets `0..window_size - 1` along both
//! axes, so it is anchored at the pixel itself and extends right and down.
//! Samples past the right or bottom edge are skipped; the window always
//! contains at least the pixel itself.

use crate::{FilterError, FilterResult};
use grayscope_core::{PixelBuffer, PixelBufferMut};

/// Reduction applied to the samples of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    /// Smallest sample
    Min,
    /// Largest sample
    Max,
    /// Sorted ascending, the element at `count / 2`
    Median,
}

impl Reducer {
    fn reduce(self, samples: &mut [u8]) -> u8 {
        match self {
            Reducer::Min => samples.iter().copied().min().unwrap_or(0),
            Reducer::Max => samples.iter().copied().max().unwrap_or(0),
            Reducer::Median => {
                samples.sort_unstable();
                samples[samples.len() / 2]
            }
        }
    }
}

/// Apply an order-statistic filter.
///
/// # Arguments
/// * `buf` - Input image
/// * `window_size` - Window parameter, at least 2; the window spans
///   `window_size - 1` samples per axis
/// * `reducer` - Statistic taken over each window
///
/// # Errors
///
/// Returns [`FilterError::InvalidWindow`] if `window_size < 2`.
pub fn rank_filter(
    buf: &PixelBuffer,
    window_size: u32,
    reducer: Reducer,
) -> FilterResult<PixelBuffer> {
    if window_size < 2 {
        return Err(FilterError::InvalidWindow(window_size));
    }
    let span = window_size - 1;
    let (w, h) = buf.dimensions();

    let mut out = PixelBufferMut::new_like(buf);
    let capacity = (span as usize).saturating_mul(span as usize);
    let mut samples = Vec::with_capacity(capacity.min(buf.pixel_count()));
    for y in 0..h {
        let y_end = y.saturating_add(span).min(h);
        let dst = out.row_mut(y);
        for x in 0..w {
            let x_end = x.saturating_add(span).min(w);
            samples.clear();
            for sy in y..y_end {
                samples.extend_from_slice(&buf.row(sy)[x as usize..x_end as usize]);
            }
            dst[x as usize] = reducer.reduce(&mut samples);
        }
    }
    Ok(out.into())
}

/// Apply a minimum filter.
pub fn min_filter(buf: &PixelBuffer, window_size: u32) -> FilterResult<PixelBuffer> {
    rank_filter(buf, window_size, Reducer::Min)
}

/// Apply a maximum filter.
pub fn max_filter(buf: &PixelBuffer, window_size: u32) -> FilterResult<PixelBuffer> {
    rank_filter(buf, window_size, Reducer::Max)
}

/// Apply a median filter.
pub fn median_filter(buf: &PixelBuffer, window_size: u32) -> FilterResult<PixelBuffer> {
    rank_filter(buf, window_size, Reducer::Median)
}
