//! grayscope-core - Basic data structures for grayscale image processing
//!
//! This crate provides the fundamental data structures shared by every
//! grayscope operation:
//!
//! - [`PixelBuffer`] / [`PixelBufferMut`] - 8-bit intensity grid (immutable / mutable)
//! - [`Histogram`] - Intensity-level counts of a buffer
//!
//! Engines never mutate their input: they read a [`PixelBuffer`], fill a
//! fresh [`PixelBufferMut`] and hand back the frozen result.

pub mod buffer;
pub mod error;
pub mod histogram;

pub use buffer::{PixelBuffer, PixelBufferMut};
pub use error::{Error, Result};
pub use histogram::{Histogram, level_divisor};

/// Number of representable gray levels in an 8-bit sample.
pub const GRAY_LEVELS: usize = 256;

/// Largest representable intensity.
pub const MAX_INTENSITY: u8 = 255;

/// Clamp a wide intermediate level into the 8-bit sample range.
///
/// Every engine accumulates in a wider type and narrows through here.
#[inline]
pub fn clamp_level(level: i64) -> u8 {
    level.clamp(0, MAX_INTENSITY as i64) as u8
}
