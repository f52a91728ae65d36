//! grayscope-test - Regression test framework for grayscope
//!
//! Each regression test creates a [`RegParams`], runs a numbered series of
//! comparisons and finally asserts on [`RegParams::cleanup`]. Two modes:
//!
//! - **Compare**: check values and buffers, record failures (default)
//! - **Display**: additionally write intermediate buffers as PNG under
//!   `tests/regout` for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use grayscope_test::{RegParams, synthetic};
//!
//! let mut rp = RegParams::new("convolve");
//! let buf = synthetic::uniform(8, 8, 100);
//! rp.compare_values(100.0, buf.get(3, 3).unwrap() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // grayscope-test is at crates/grayscope-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
