//! Intensity histograms
//!
//! A [`Histogram`] always has [`GRAY_LEVELS`] buckets. Full-range histograms
//! count raw intensities; reduced-level histograms first divide each sample
//! by [`level_divisor`], so only the low buckets are populated.

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::GRAY_LEVELS;

/// Divisor that folds 256 intensities into `level_count` buckets.
///
/// Computed as `256 / level_count + 1`, so 2 levels divide by 129, 4 by 65
/// and 8 by 33. The extra `+ 1` keeps 255 inside the last bucket; it also
/// means 256 levels divide by 2.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] unless `1 <= level_count <= 256`.
pub fn level_divisor(level_count: u32) -> Result<u32> {
    if level_count == 0 || level_count as usize > GRAY_LEVELS {
        return Err(Error::InvalidParameter(format!(
            "level count must be between 1 and {GRAY_LEVELS}, got {level_count}"
        )));
    }
    Ok(GRAY_LEVELS as u32 / level_count + 1)
}

/// Per-level pixel counts of a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
    total: u64,
}

impl Histogram {
    /// Count raw intensities of `buf`.
    pub fn from_buffer(buf: &PixelBuffer) -> Self {
        let mut counts = vec![0u64; GRAY_LEVELS];
        for &v in buf.data() {
            counts[v as usize] += 1;
        }
        Histogram {
            counts,
            total: buf.pixel_count() as u64,
        }
    }

    /// Count intensities after folding them into `level_count` levels.
    ///
    /// # Errors
    ///
    /// See [`level_divisor`].
    pub fn with_levels(buf: &PixelBuffer, level_count: u32) -> Result<Self> {
        let divisor = level_divisor(level_count)?;
        let mut counts = vec![0u64; GRAY_LEVELS];
        for &v in buf.data() {
            counts[(v as u32 / divisor) as usize] += 1;
        }
        Ok(Histogram {
            counts,
            total: buf.pixel_count() as u64,
        })
    }

    /// All bucket counts, index = level.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count of a single level.
    #[inline]
    pub fn count(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// Number of pixels counted (`width * height`).
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Normalized histogram: `count[i] / total`.
    pub fn probabilities(&self) -> Vec<f64> {
        let n = self.total as f64;
        self.counts.iter().map(|&c| c as f64 / n).collect()
    }

    /// Mean intensity, `sum(i * p(i))` over the buckets.
    pub fn mean_intensity(&self) -> f64 {
        self.probabilities()
            .iter()
            .enumerate()
            .map(|(i, p)| i as f64 * p)
            .sum()
    }
}

impl PixelBuffer {
    /// Get the full-range intensity histogram.
    pub fn histogram(&self) -> Histogram {
        Histogram::from_buffer(self)
    }
}
