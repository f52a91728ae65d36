//! Named constant kernels
//!
//! Every entry is a `static` [`CatalogKernel`] whose weights are laid out
//! column by column (`[i][j]`, `i` along x), the same layout
//! [`Kernel::from_grid`](crate::Kernel::from_grid) accepts.
//!
//! The Roberts cross operators are 2x2 by nature; they are embedded in the
//! top-left corner of a 3x3 grid so that their taps land on offsets
//! `{-1, 0}` around the center like the other 3x3 operators.

use crate::kernel::{KernelSource, check_extent};
use crate::{FilterError, FilterResult};

/// A kernel stored as static data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogKernel {
    name: &'static str,
    size: u32,
    /// `size * size` weights, column by column
    weights: &'static [i32],
}

impl CatalogKernel {
    pub(crate) const fn new(name: &'static str, size: u32, weights: &'static [i32]) -> Self {
        CatalogKernel {
            name,
            size,
            weights,
        }
    }

    /// Lookup name, e.g. `"laplacian2"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Side length (catalog kernels are square).
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Weights column by column.
    pub fn weights(&self) -> &'static [i32] {
        self.weights
    }
}

impl KernelSource for CatalogKernel {
    #[inline]
    fn width(&self) -> u32 {
        self.size
    }

    #[inline]
    fn height(&self) -> u32 {
        self.size
    }

    #[inline]
    fn weight(&self, i: u32, j: u32) -> i32 {
        self.weights[(i * self.size + j) as usize]
    }

    fn validate(&self) -> FilterResult<()> {
        check_extent(self.size, self.size)?;
        let expected = self.size as usize * self.size as usize;
        if self.weights.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "{}: expected {expected} weights, got {}",
                self.name,
                self.weights.len()
            )));
        }
        Ok(())
    }
}

/// 3x3 box filter
pub static UNIFORM_3X3: CatalogKernel = CatalogKernel::new("uniform3", 3, &[1; 9]);

/// 5x5 box filter
pub static UNIFORM_5X5: CatalogKernel = CatalogKernel::new("uniform5", 5, &[1; 25]);

/// 3x3 weighted average
#[rustfmt::skip]
pub static WEIGHTED_3X3: CatalogKernel = CatalogKernel::new("weighted3", 3, &[
    1, 2, 1,
    2, 4, 2,
    1, 2, 1,
]);

/// 3x3 Gaussian, sigma = 1
#[rustfmt::skip]
pub static GAUSSIAN_3X3: CatalogKernel = CatalogKernel::new("gaussian3", 3, &[
    1, 2, 1,
    2, 4, 2,
    1, 2, 1,
]);

/// 5x5 Gaussian, sigma = 1
#[rustfmt::skip]
pub static GAUSSIAN_5X5: CatalogKernel = CatalogKernel::new("gaussian5", 5, &[
    1,  4,  7,  4, 1,
    4, 16, 26, 16, 4,
    7, 26, 41, 26, 7,
    4, 16, 26, 16, 4,
    1,  4,  7,  4, 1,
]);

/// Sobel operator, responds to intensity changes along x
#[rustfmt::skip]
pub static SOBEL_1: CatalogKernel = CatalogKernel::new("sobel1", 3, &[
    -1, -2, -1,
     0,  0,  0,
     1,  2,  1,
]);

/// Sobel operator, responds to intensity changes along y
#[rustfmt::skip]
pub static SOBEL_2: CatalogKernel = CatalogKernel::new("sobel2", 3, &[
    -1, 0, 1,
    -2, 0, 2,
    -1, 0, 1,
]);

/// Roberts cross, main diagonal
#[rustfmt::skip]
pub static ROBERTS_1: CatalogKernel = CatalogKernel::new("roberts1", 3, &[
    -1, 0, 0,
     0, 1, 0,
     0, 0, 0,
]);

/// Roberts cross, anti-diagonal
#[rustfmt::skip]
pub static ROBERTS_2: CatalogKernel = CatalogKernel::new("roberts2", 3, &[
    0, -1, 0,
    1,  0, 0,
    0,  0, 0,
]);

/// Laplacian, 4-neighbor, positive off-center weights
#[rustfmt::skip]
pub static LAPLACIAN_1: CatalogKernel = CatalogKernel::new("laplacian1", 3, &[
    0,  1, 0,
    1, -4, 1,
    0,  1, 0,
]);

/// Laplacian, 8-neighbor, positive off-center weights
#[rustfmt::skip]
pub static LAPLACIAN_2: CatalogKernel = CatalogKernel::new("laplacian2", 3, &[
    1,  1, 1,
    1, -8, 1,
    1,  1, 1,
]);

/// Laplacian, 4-neighbor, all weights non-positive
#[rustfmt::skip]
pub static LAPLACIAN_3: CatalogKernel = CatalogKernel::new("laplacian3", 3, &[
     0, -1,  0,
    -1, -4, -1,
     0, -1,  0,
]);

/// Laplacian, 8-neighbor, all weights non-positive
#[rustfmt::skip]
pub static LAPLACIAN_4: CatalogKernel = CatalogKernel::new("laplacian4", 3, &[
    -1, -1, -1,
    -1, -8, -1,
    -1, -1, -1,
]);

/// Every catalog entry, smoothing kernels first.
pub static ALL: [&CatalogKernel; 13] = [
    &UNIFORM_3X3,
    &UNIFORM_5X5,
    &WEIGHTED_3X3,
    &GAUSSIAN_3X3,
    &GAUSSIAN_5X5,
    &SOBEL_1,
    &SOBEL_2,
    &ROBERTS_1,
    &ROBERTS_2,
    &LAPLACIAN_1,
    &LAPLACIAN_2,
    &LAPLACIAN_3,
    &LAPLACIAN_4,
];

/// Look up a catalog kernel by name (case-insensitive).
pub fn by_name(name: &str) -> Option<&'static CatalogKernel> {
    ALL.iter()
        .copied()
        .find(|k| k.name.eq_ignore_ascii_case(name))
}
