//! Convolution kernels
//!
//! A kernel is an odd-sized grid of signed integer weights. Weights are
//! addressed as `[i][j]` with `i` running along x and `j` along y, and the
//! center tap sits at `((width - 1) / 2, (height - 1) / 2)`.
//!
//! Anything that can describe such a grid implements [`KernelSource`]:
//! owned [`Kernel`]s built at runtime as well as the `static` entries of
//! the [catalog](crate::catalog).

use crate::{FilterError, FilterResult};

/// Read access to a kernel's weights
pub trait KernelSource {
    /// Extent along x.
    fn width(&self) -> u32;

    /// Extent along y.
    fn height(&self) -> u32;

    /// Weight at column `i` (x) and row `j` (y).
    ///
    /// # Panics
    ///
    /// May panic if `i >= width()` or `j >= height()`.
    fn weight(&self, i: u32, j: u32) -> i32;

    /// Check that the kernel is usable: odd, non-empty extents and a weight
    /// for every tap.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] otherwise.
    fn validate(&self) -> FilterResult<()> {
        check_extent(self.width(), self.height())
    }

    /// Center tap `(cx, cy)`.
    fn center(&self) -> (u32, u32) {
        ((self.width() - 1) / 2, (self.height() - 1) / 2)
    }

    /// Sum of all weights.
    fn weight_sum(&self) -> i64 {
        self.taps().map(|(_, _, w)| w as i64).sum()
    }

    /// True when no weight is negative (a smoothing kernel).
    fn is_non_negative(&self) -> bool {
        self.taps().all(|(_, _, w)| w >= 0)
    }

    /// Iterate over `(i, j, weight)`, `j` varying fastest.
    fn taps(&self) -> Taps<'_, Self> {
        Taps {
            source: self,
            i: 0,
            j: 0,
        }
    }

    /// Copy the weights into an owned [`Kernel`].
    fn to_kernel(&self) -> FilterResult<Kernel> {
        let weights = self.taps().map(|(_, _, w)| w).collect();
        Kernel::from_columns(self.width(), self.height(), weights)
    }
}

/// Iterator over the taps of a [`KernelSource`]
pub struct Taps<'a, K: ?Sized> {
    source: &'a K,
    i: u32,
    j: u32,
}

impl<K: KernelSource + ?Sized> Iterator for Taps<'_, K> {
    type Item = (u32, u32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.source.width() {
            return None;
        }
        let item = (self.i, self.j, self.source.weight(self.i, self.j));
        self.j += 1;
        if self.j >= self.source.height() {
            self.j = 0;
            self.i += 1;
        }
        Some(item)
    }
}

/// Check that a kernel extent is odd and non-zero.
pub(crate) fn check_extent(width: u32, height: u32) -> FilterResult<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel must not be empty, got {width}x{height}"
        )));
    }
    if width % 2 == 0 || height % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel extent must be odd, got {width}x{height}"
        )));
    }
    Ok(())
}

/// An owned 2D convolution kernel
///
/// # Examples
///
/// ```
/// use grayscope_filter::{Kernel, KernelSource};
///
/// let k = Kernel::from_grid(&[[0, 1, 0], [1, -4, 1], [0, 1, 0]]).unwrap();
/// assert_eq!(k.center(), (1, 1));
/// assert_eq!(k.weight_sum(), 0);
/// assert!(!k.is_non_negative());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    width: u32,
    height: u32,
    /// Weights column by column: `[i * height + j]`
    weights: Vec<i32>,
}

impl Kernel {
    /// Create a kernel from a grid indexed `grid[i][j]` (`i` along x).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] for an empty or jagged grid
    /// or an even extent.
    pub fn from_grid<C: AsRef<[i32]>>(grid: &[C]) -> FilterResult<Self> {
        let height = grid.first().map_or(0, |c| c.as_ref().len());
        let mut weights = Vec::with_capacity(grid.len() * height);
        for (i, column) in grid.iter().enumerate() {
            let column = column.as_ref();
            if column.len() != height {
                return Err(FilterError::InvalidKernel(format!(
                    "jagged kernel: column {i} has {} weights, expected {height}",
                    column.len()
                )));
            }
            weights.extend_from_slice(column);
        }
        Self::from_columns(grid.len() as u32, height as u32, weights)
    }

    /// Create a kernel from weights laid out column by column.
    pub fn from_columns(width: u32, height: u32, weights: Vec<i32>) -> FilterResult<Self> {
        check_extent(width, height)?;
        if weights.len() != width as usize * height as usize {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} weights for {width}x{height}, got {}",
                width as usize * height as usize,
                weights.len()
            )));
        }
        Ok(Kernel {
            width,
            height,
            weights,
        })
    }

    /// Create a `size`x`size` kernel of ones.
    pub fn uniform(size: u32) -> FilterResult<Self> {
        check_extent(size, size)?;
        Self::from_columns(size, size, vec![1; size as usize * size as usize])
    }

    /// Get the weight at (i, j), or `None` outside the grid.
    #[inline]
    pub fn get(&self, i: u32, j: u32) -> Option<i32> {
        if i < self.width && j < self.height {
            Some(self.weights[(i * self.height + j) as usize])
        } else {
            None
        }
    }

    /// Weights column by column.
    pub fn weights(&self) -> &[i32] {
        &self.weights
    }
}

impl KernelSource for Kernel {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn weight(&self, i: u32, j: u32) -> i32 {
        self.weights[(i * self.height + j) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_grid_indexing() {
        // grid[i][j]: first column (x = 0) is [-1, -2, -1]
        let k = Kernel::from_grid(&[[-1, -2, -1], [0, 0, 0], [1, 2, 1]]).unwrap();
        assert_eq!(k.weight(0, 1), -2);
        assert_eq!(k.weight(2, 0), 1);
        assert_eq!(k.get(1, 1), Some(0));
        assert_eq!(k.get(3, 0), None);
    }

    #[test]
    fn test_even_kernel_rejected() {
        assert!(matches!(
            Kernel::from_grid(&[[1, 1], [1, 1]]),
            Err(FilterError::InvalidKernel(_))
        ));
        assert!(matches!(
            Kernel::uniform(4),
            Err(FilterError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_empty_and_jagged_rejected() {
        let empty: [[i32; 3]; 0] = [];
        assert!(Kernel::from_grid(&empty).is_err());
        assert!(Kernel::from_grid(&[vec![1, 1, 1], vec![1, 1], vec![1, 1, 1]]).is_err());
        assert!(Kernel::from_columns(3, 3, vec![1; 8]).is_err());
    }

    #[test]
    fn test_uniform_sum() {
        let k = Kernel::uniform(5).unwrap();
        assert_eq!(k.weight_sum(), 25);
        assert!(k.is_non_negative());
        assert_eq!(k.center(), (2, 2));
    }

    #[test]
    fn test_taps_order() {
        let k = Kernel::from_columns(3, 1, vec![7, 8, 9]).unwrap();
        let taps: Vec<_> = k.taps().collect();
        assert_eq!(taps, vec![(0, 0, 7), (1, 0, 8), (2, 0, 9)]);
    }

    #[test]
    fn test_to_kernel_copies() {
        let k = Kernel::uniform(3).unwrap();
        assert_eq!(k.to_kernel().unwrap(), k);
    }
}
