//! Error types for grayscope-core
//!
//! Provides a unified error type for buffer construction and access.
//! Shape problems (empty or jagged grids, raw data of the wrong length,
//! two buffers of different sizes) all surface here so that every engine
//! built on top of the core reports them the same way.

use thiserror::Error;

/// grayscope core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Empty, jagged or otherwise non-rectangular pixel grid
    #[error("shape error: {0}")]
    Shape(String),

    /// Two buffers that must share a shape do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Coordinates outside the buffer
    #[error("index out of bounds: ({x}, {y}) outside {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
