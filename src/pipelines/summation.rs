//! # Summation Pipeline
//!
//! Orchestrates one batch run:
//! 1. Obtain the matrix (file, stdin, or seeded generator)
//! 2. Run the chunked engine with the configured worker count and dispatch
//! 3. Optionally run the sequential reference for comparison
//! 4. Return a report with totals and timings

use std::fmt;
use std::time::{Duration, Instant};

use tracing::instrument;

use crate::config::{Config, MatrixSource};
use crate::data::{Matrix, SyntheticMatrix};
use crate::error::Result;
use crate::io::read_matrix;
use crate::model::{ChunkedSum, Dispatch, SequentialSum, SumMatrix};

/// Summation pipeline
pub struct SummationPipeline {
    config: Config,
}

/// Sequential reference result
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequentialRun {
    pub total: f64,
    pub elapsed: Duration,
}

/// Outcome of one pipeline run
#[derive(Clone, Debug, PartialEq)]
pub struct SummationReport {
    pub rows: usize,
    pub elements: usize,
    pub workers: usize,
    pub chunk_size: usize,
    pub dispatch: Dispatch,
    pub total: f64,
    pub elapsed: Duration,
    pub sequential: Option<SequentialRun>,
}

impl SummationReport {
    /// `|chunked - sequential|`, if the comparison was run
    pub fn difference(&self) -> Option<f64> {
        self.sequential.map(|seq| (self.total - seq.total).abs())
    }
}

impl fmt::Display for SummationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}", self.rows)?;
        writeln!(f, "Elements: {}", self.elements)?;
        writeln!(
            f,
            "Workers: {} ({}, chunk size {})",
            self.workers,
            self.dispatch.as_str(),
            self.chunk_size
        )?;
        write!(
            f,
            "Chunked sum: {} in {:.3}ms",
            self.total,
            self.elapsed.as_secs_f64() * 1e3
        )?;
        if let Some(seq) = self.sequential {
            write!(
                f,
                "\nSequential sum: {} in {:.3}ms",
                seq.total,
                seq.elapsed.as_secs_f64() * 1e3
            )?;
            if let Some(diff) = self.difference() {
                write!(f, "\nDifference: {:e}", diff)?;
            }
        }
        Ok(())
    }
}

impl SummationPipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load or generate, then sum.
    pub fn run(&self) -> Result<SummationReport> {
        let matrix = self.load_matrix()?;
        self.run_on(&matrix)
    }

    pub fn load_matrix(&self) -> Result<Matrix> {
        match self.config.source() {
            MatrixSource::File(path) => read_matrix(path, self.config.format),
            MatrixSource::Generated {
                rows,
                max_cols,
                seed,
            } => {
                let matrix = SyntheticMatrix::new(rows)
                    .max_cols(max_cols)
                    .seed(seed)
                    .build();
                tracing::info!(
                    rows,
                    max_cols,
                    seed,
                    elements = matrix.n_elements(),
                    "generated matrix"
                );
                Ok(matrix)
            }
        }
    }

    #[instrument(skip_all, fields(rows = matrix.n_rows()))]
    pub fn run_on(&self, matrix: &Matrix) -> Result<SummationReport> {
        let engine = ChunkedSum::new(self.config.workers())?.dispatch(self.config.dispatch);
        let elements = matrix.n_elements();
        let chunk_size = engine.partition_for(elements).chunk_size();

        let start = Instant::now();
        let total = engine.sum_matrix(matrix)?;
        let elapsed = start.elapsed();
        tracing::info!(
            strategy = engine.name(),
            total,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "summed"
        );

        let sequential = if self.config.compare {
            let start = Instant::now();
            let total = SequentialSum.sum_matrix(matrix)?;
            let elapsed = start.elapsed();
            tracing::info!(
                strategy = SequentialSum.name(),
                total,
                elapsed_ms = elapsed.as_secs_f64() * 1e3,
                "summed"
            );
            Some(SequentialRun { total, elapsed })
        } else {
            None
        };

        Ok(SummationReport {
            rows: matrix.n_rows(),
            elements,
            workers: engine.workers().get(),
            chunk_size,
            dispatch: engine.dispatch_mode(),
            total,
            elapsed,
            sequential,
        })
    }
}
