//! Histogram equalization
//!
//! The transfer function is accumulated from per-level contributions
//! `floor(255 * p(i))`, each floored before it is added. Rounding loss
//! therefore grows with the number of populated levels, and the top of
//! the mapping may stay below 255.

use grayscope_core::{GRAY_LEVELS, Histogram, MAX_INTENSITY, PixelBuffer};

/// A monotone 256-entry intensity mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeMapping {
    table: [u8; GRAY_LEVELS],
}

impl CumulativeMapping {
    /// Build the equalization mapping of a histogram.
    pub fn from_histogram(hist: &Histogram) -> Self {
        let mut table = [0u8; GRAY_LEVELS];
        let mut acc = 0u64;
        for (entry, p) in table.iter_mut().zip(hist.probabilities()) {
            acc += (MAX_INTENSITY as f64 * p).floor() as u64;
            *entry = acc.min(MAX_INTENSITY as u64) as u8;
        }
        CumulativeMapping { table }
    }

    /// Mapped value of a level.
    #[inline]
    pub fn get(&self, level: u8) -> u8 {
        self.table[level as usize]
    }

    /// The full table, index = input level.
    pub fn table(&self) -> &[u8; GRAY_LEVELS] {
        &self.table
    }

    /// Remap every sample of `buf` through the table.
    pub fn apply(&self, buf: &PixelBuffer) -> PixelBuffer {
        buf.map(|v| self.table[v as usize])
    }
}

/// Equalization mapping of a buffer's own histogram.
pub fn equalization_mapping(buf: &PixelBuffer) -> CumulativeMapping {
    CumulativeMapping::from_histogram(&buf.histogram())
}

/// Equalize the histogram of a buffer.
pub fn equalize_histogram(buf: &PixelBuffer) -> PixelBuffer {
    equalization_mapping(buf).apply(buf)
}
