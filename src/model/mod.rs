//! # Model Module
//!
//! Summation strategies.
//!
//! ## Core Algorithms
//! - `partition`: chunk-size formula and chunk descriptors
//! - `worker`: per-chunk summation and result handoff
//! - `engine`: the partitioned reduction engine (`ChunkedSum`)
//! - `sequential`: single-threaded reference (`SequentialSum`)

pub mod engine;
pub mod partition;
pub mod sequential;
pub mod worker;

pub use engine::{sum, ChunkedSum, Dispatch};
pub use partition::{chunk_size, Chunk, Partition};
pub use sequential::SequentialSum;
pub use worker::CompletionSlot;

use crate::data::Matrix;
use crate::error::Result;

/// A way of summing every element of a matrix.
pub trait SumMatrix {
    /// Short label used in logs and reports
    fn name(&self) -> &'static str;

    /// Sum all elements of a row-shaped input.
    fn sum_rows<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<f64>;

    fn sum_matrix(&self, matrix: &Matrix) -> Result<f64> {
        self.sum_rows(matrix.rows())
    }
}
