//! # Parsum Library Root
//!
//! ## Role
//! Partitioned parallel summation of (possibly ragged) `f64` matrices.
//! The matrix is flattened, split into `n` contiguous chunks, every chunk is
//! summed by its own concurrent worker, and the partial sums are folded in
//! chunk order into one deterministic total.
//!
//! ```
//! let m = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0, 10.0]];
//! assert_eq!(parsum::sum(&m, 3).unwrap(), 55.0);
//! assert!(parsum::sum(&m, 0).unwrap_err().is_invalid_configuration());
//! ```
//!
//! ## Module Structure
//! ```text
//! parsum
//! ├── config      # CLI configuration for the batch driver
//! ├── data        # Matrix representation, flattening, synthetic input
//! ├── error       # Error enum and Result alias
//! ├── io          # Text / JSON matrix loaders
//! ├── model       # Partitioning, workers, chunked and sequential sums
//! ├── pipelines   # Load -> sum -> report orchestration
//! └── utils       # Thread pool helpers
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod io;
pub mod model;
pub mod pipelines;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use data::{Matrix, SyntheticMatrix};
pub use error::{ParsumError, Result};
pub use model::{sum, ChunkedSum, Dispatch, SequentialSum, SumMatrix};
pub use pipelines::{SummationPipeline, SummationReport};
