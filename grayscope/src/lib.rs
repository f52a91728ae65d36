//! Grayscope - Spatial-domain image processing for grayscale images
//!
//! # Overview
//!
//! Grayscope works on 8-bit intensity grids and provides:
//!
//! - Image I/O (PNG, JPEG, PNM)
//! - Convolution with a catalog of smoothing, gradient and Laplacian kernels
//! - Order-statistic filters (min, max, median)
//! - Intensity curves, bit-plane slicing and level reduction
//! - Histogram equalization
//! - Sharpening: Laplacian, unsharp masking, highboost, gradient magnitude
//! - Gaussian and Rayleigh noise
//!
//! # Example
//!
//! ```
//! use grayscope::PixelBuffer;
//! use grayscope::filter::{catalog, convolve};
//!
//! let buf = PixelBuffer::from_rows(&[[0u8, 85], [170, 255]]).unwrap();
//! let out = convolve(&buf, &catalog::UNIFORM_3X3).unwrap();
//! assert!(out.data().iter().all(|&v| v == 56));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use grayscope_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use grayscope_filter as filter;
pub use grayscope_io as io;
