//! # Matrix Representation
//!
//! ## Role
//! Owned, possibly ragged, row-major matrix of `f64` values, plus the
//! flattening step shared by every summation strategy.
//!
//! Flattening concatenates rows in their given order into one contiguous
//! buffer. It is single-threaded and must finish before any chunk boundary
//! can be computed, since boundaries depend on the total element count.

use serde::{Deserialize, Serialize};

/// Ragged row-major matrix.
///
/// Serializes as a plain array of arrays (`[[1.0, 2.0], [3.0]]`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Matrix with no rows
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Total element count across all rows
    #[inline]
    pub fn n_elements(&self) -> usize {
        element_count(&self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.n_elements() == 0
    }

    /// True if at least two rows differ in length
    pub fn is_ragged(&self) -> bool {
        match self.rows.first() {
            Some(first) => self.rows.iter().any(|row| row.len() != first.len()),
            None => false,
        }
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&[f64]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    pub fn push_row(&mut self, row: Vec<f64>) {
        self.rows.push(row);
    }

    /// Row-major concatenation of all rows
    pub fn flatten(&self) -> Vec<f64> {
        flatten(&self.rows)
    }
}

impl From<Vec<Vec<f64>>> for Matrix {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::new(rows)
    }
}

/// Total number of elements in a row-shaped input.
pub fn element_count<R: AsRef<[f64]>>(rows: &[R]) -> usize {
    rows.iter().map(|row| row.as_ref().len()).sum()
}

/// Concatenate rows, in order, into one sequence.
pub fn flatten<R: AsRef<[f64]>>(rows: &[R]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(element_count(rows));
    for row in rows {
        flat.extend_from_slice(row.as_ref());
    }
    flat
}
