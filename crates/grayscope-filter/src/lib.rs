//! grayscope-filter - Spatial-domain filtering for grayscale images
//!
//! This crate provides the image processing engines of grayscope:
//!
//! - Convolution with boundary-skip and range policies ([`convolve`])
//! - A catalog of named kernels ([`catalog`])
//! - Order-statistic filters: min, max, median ([`rank`])
//! - Intensity curves, bit-plane slicing, level reduction ([`intensity`])
//! - Histogram equalization ([`equalize`])
//! - Sharpening: Laplacian, unsharp masking, gradients ([`sharpen`])
//! - Noise models ([`noise`])
//!
//! Every operation reads a [`PixelBuffer`](grayscope_core::PixelBuffer)
//! and returns a new one of the same size.

pub mod catalog;
pub mod convolve;
pub mod equalize;
mod error;
pub mod intensity;
pub mod kernel;
pub mod noise;
pub mod rank;
pub mod sharpen;

pub use catalog::CatalogKernel;
pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, KernelSource};

// Re-export commonly used functions
pub use convolve::{RangePolicy, convolve, convolve_with, gaussian_smooth, smooth};
pub use equalize::{CumulativeMapping, equalization_mapping, equalize_histogram};
pub use intensity::{
    clear_bit, gamma_transform, log_transform, power_law_transform, reduce_levels, slice_low_bits,
};
pub use noise::{NoiseModel, add_noise, gaussian_pdf, normalize_range, rayleigh_pdf};
pub use rank::{Reducer, max_filter, median_filter, min_filter, rank_filter};
pub use sharpen::{
    GradientOperator, GradientPair, SubtractPolicy, add_mask, gradient, gradient_magnitude,
    laplacian, laplacian_sharpen, subtract, unsharp_mask,
};
