//! # Synthetic Matrices
//!
//! Seeded generator for ragged matrices. Used by the CLI `--generate` mode,
//! integration tests and benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Matrix;

/// Builder for a reproducible random ragged matrix.
///
/// Row lengths are uniform in `0..=max_cols`, values uniform in `[-1, 1)`.
#[derive(Clone, Debug)]
pub struct SyntheticMatrix {
    n_rows: usize,
    max_cols: usize,
    seed: u64,
}

impl SyntheticMatrix {
    pub fn new(n_rows: usize) -> Self {
        Self {
            n_rows,
            max_cols: 64,
            seed: 42,
        }
    }

    pub fn max_cols(mut self, max_cols: usize) -> Self {
        self.max_cols = max_cols;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(&self) -> Matrix {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let rows = (0..self.n_rows)
            .map(|_| {
                let len = rng.gen_range(0..=self.max_cols);
                (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
            })
            .collect();
        Matrix::new(rows)
    }
}
