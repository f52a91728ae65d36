//! Pixel access functions
//!
//! Getting and setting individual samples. Checked accessors return
//! `Option` / `Result`; the `_unchecked` variants index directly and panic
//! on out-of-range coordinates. Neighborhood code probes with signed
//! coordinates through [`PixelBuffer::get_signed`], which treats anything
//! outside the grid as absent.

use super::{PixelBuffer, PixelBufferMut};
use crate::error::{Error, Result};

impl PixelBuffer {
    /// Get the sample at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.inner.width && y < self.inner.height {
            Some(self.get_unchecked(x, y))
        } else {
            None
        }
    }

    /// Get the sample at signed coordinates.
    ///
    /// Returns `None` for any position outside `[0, width) x [0, height)`.
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.inner.width as i64 || y >= self.inner.height as i64 {
            return None;
        }
        Some(self.get_unchecked(x as u32, y as u32))
    }

    /// Get the sample at (x, y) without an `Option`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.inner.width, "x = {x} out of range");
        self.inner.data[y as usize * self.inner.width as usize + x as usize]
    }

    /// Iterate over `(x, y, value)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        let w = self.inner.width;
        self.inner
            .data
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i as u32) % w, (i as u32) / w, v))
    }
}

impl PixelBufferMut {
    /// Get the sample at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.inner.width && y < self.inner.height {
            Some(self.inner.data[y as usize * self.inner.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Set the sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        self.set_unchecked(x, y, value);
        Ok(())
    }

    /// Set the sample at (x, y) without a `Result`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: u8) {
        assert!(x < self.inner.width, "x = {x} out of range");
        let w = self.inner.width as usize;
        self.inner.data[y as usize * w + x as usize] = value;
    }
}
