//! Error types for grayscope-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] grayscope_core::Error),

    /// Kernel with an even or zero extent, jagged rows, or weights that
    /// cannot be used by the requested operation
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Order-statistic window below the minimum size of 2
    #[error("invalid window size {0}: must be at least 2")]
    InvalidWindow(u32),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
