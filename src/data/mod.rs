//! # Data Module
//!
//! In-memory representations of the numeric input.
//!
//! ## Design Philosophy
//! - **Caller owns the matrix:** summation borrows rows read-only and never
//!   mutates them. Anything row-shaped (`Vec<Vec<f64>>`, `&[[f64; N]]`,
//!   [`Matrix`]) can be summed through `AsRef<[f64]>`.
//! - **Ragged is normal:** rows may have different lengths; only the
//!   row-major concatenation order matters.

pub mod matrix;
pub mod synthetic;

// Re-export commonly used types
pub use matrix::{element_count, flatten, Matrix};
pub use synthetic::SyntheticMatrix;
