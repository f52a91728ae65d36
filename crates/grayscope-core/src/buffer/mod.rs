//! PixelBuffer - The grayscale image container
//!
//! A `PixelBuffer` is a rectangular grid of 8-bit intensity samples.
//! It is the only data representation the engines exchange.
//!
//! # Layout
//!
//! - Samples are stored row-major, one byte per pixel, no padding
//! - Sample `(x, y)` lives at index `y * width + x`
//! - Both dimensions are strictly positive
//!
//! # Ownership model
//!
//! `PixelBuffer` uses `Arc` for cheap cloning (shared ownership) and is
//! never written through. To fill a new image, create a [`PixelBufferMut`]
//! (directly, via [`PixelBuffer::try_into_mut`] or [`PixelBuffer::to_mut`]),
//! then freeze it with `Into<PixelBuffer>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal buffer data
#[derive(Debug, Clone, PartialEq, Eq)]
struct BufferData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major samples, `width * height` long
    data: Vec<u8>,
}

impl BufferData {
    fn zeroed(width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(BufferData {
            width,
            height,
            data: vec![0u8; width as usize * height as usize],
        })
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::Shape(format!(
            "buffer dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

/// Immutable 8-bit grayscale image
///
/// # Examples
///
/// ```
/// use grayscope_core::PixelBuffer;
///
/// let buf = PixelBuffer::from_rows(&[[0u8, 85], [170, 255]]).unwrap();
/// assert_eq!(buf.width(), 2);
/// assert_eq!(buf.height(), 2);
/// assert_eq!(buf.get(1, 0), Some(85));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    inner: Arc<BufferData>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixelBuffer {
            inner: Arc::new(BufferData::zeroed(width, height)?),
        })
    }

    /// Create a buffer with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        check_dimensions(width, height)?;
        Self::from_raw(
            width,
            height,
            vec![value; width as usize * height as usize],
        )
    }

    /// Create a buffer from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if a dimension is 0 or `data.len()` is not
    /// `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::Shape(format!(
                "expected {expected} samples for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(PixelBuffer {
            inner: Arc::new(BufferData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create a buffer from rows of samples, indexed `rows[y][x]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if there are no rows, the first row is
    /// empty, or any row differs in length from the first.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| Error::Shape("empty pixel grid".to_string()))?;
        let width = first.as_ref().len();
        if width == 0 {
            return Err(Error::Shape("empty pixel grid".to_string()));
        }

        let mut data = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(Error::Shape(format!(
                    "inconsistent row length at row {y}: expected {width}, got {}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        let width = u32::try_from(width)
            .map_err(|_| Error::Shape(format!("row too long: {width} samples")))?;
        let height = u32::try_from(rows.len())
            .map_err(|_| Error::Shape(format!("too many rows: {}", rows.len())))?;
        Self::from_raw(width, height, data)
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> u8,
    {
        let mut out = PixelBufferMut::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                out.set_unchecked(x, y, f(x, y));
            }
        }
        Ok(out.into())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Number of pixels, `width * height`.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.data.len()
    }

    /// Get raw row-major samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.inner.data.chunks_exact(self.inner.width as usize)
    }

    /// Copy the samples out as `rows[y][x]`.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }

    /// Get the number of strong references to this buffer.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check whether two buffers have the same width and height.
    pub fn sizes_equal(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Require `other` to have the same dimensions as `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn check_same_size(&self, other: &PixelBuffer) -> Result<()> {
        if self.sizes_equal(other) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            })
        }
    }

    /// Apply a point-wise mapping to every sample, producing a new buffer.
    pub fn map<F>(&self, mut f: F) -> PixelBuffer
    where
        F: FnMut(u8) -> u8,
    {
        let data = self.inner.data.iter().map(|&v| f(v)).collect();
        PixelBuffer {
            inner: Arc::new(BufferData {
                width: self.inner.width,
                height: self.inner.height,
                data,
            }),
        }
    }

    /// Create a deep copy of this buffer.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        PixelBuffer {
            inner: Arc::new(BufferData::clone(&self.inner)),
        }
    }

    /// Try to get mutable access to the samples.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixelBufferMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixelBufferMut { inner: data }),
            Err(arc) => Err(PixelBuffer { inner: arc }),
        }
    }

    /// Create a mutable copy of this buffer.
    pub fn to_mut(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: BufferData::clone(&self.inner),
        }
    }
}

/// Mutable grayscale image
///
/// The write side of a [`PixelBuffer`]. Convert back with `Into<PixelBuffer>`.
#[derive(Debug)]
pub struct PixelBufferMut {
    inner: BufferData,
}

impl PixelBufferMut {
    /// Create a zero-filled mutable buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixelBufferMut {
            inner: BufferData::zeroed(width, height)?,
        })
    }

    /// Create a zero-filled mutable buffer shaped like `template`.
    pub fn new_like(template: &PixelBuffer) -> Self {
        PixelBufferMut {
            inner: BufferData {
                width: template.width(),
                height: template.height(),
                data: vec![0u8; template.pixel_count()],
            },
        }
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw row-major samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable row-major samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get mutable samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<PixelBufferMut> for PixelBuffer {
    fn from(buf: PixelBufferMut) -> Self {
        PixelBuffer {
            inner: Arc::new(buf.inner),
        }
    }
}
