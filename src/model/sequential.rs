//! # Sequential Reference Sum
//!
//! Single-threaded left fold from `0.0` in row-major order. This is the
//! baseline the chunked engine is checked against, and what a one-worker
//! chunked sum reproduces bit for bit.

use super::SumMatrix;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SequentialSum;

impl SumMatrix for SequentialSum {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn sum_rows<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<f64> {
        Ok(rows
            .iter()
            .flat_map(|row| row.as_ref().iter())
            .fold(0.0, |acc, &x| acc + x))
    }
}
