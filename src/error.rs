//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.
//!
//! The summation engine itself rejects bad worker counts with
//! [`ParsumError::InvalidConfiguration`], and reports worker counts too large
//! to hold one result slot each with [`ParsumError::ResourceExhausted`]. The
//! remaining variants belong to the batch driver or to thread creation.

use thiserror::Error;

/// Main error type for parsum operations
#[derive(Error, Debug)]
pub enum ParsumError {
    /// Worker count below one
    #[error("Invalid configuration: worker count must be at least 1, got {workers}")]
    InvalidConfiguration { workers: i64 },

    /// No room for one partial-sum slot per worker
    #[error("Cannot allocate result slots for {workers} workers: {source}")]
    ResourceExhausted {
        workers: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    /// Configuration errors (invalid CLI arguments)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O errors (file missing, permission denied, read failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text matrix parse errors
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// JSON matrix parse errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The OS refused to create a worker thread
    #[error("Failed to spawn worker for chunk {chunk}: {source}")]
    WorkerSpawn {
        chunk: usize,
        #[source]
        source: std::io::Error,
    },

    /// Rayon pool construction failed
    #[error("Thread pool error: {message}")]
    ThreadPool { message: String },
}

/// Type alias for Results using ParsumError
pub type Result<T> = std::result::Result<T, ParsumError>;

impl ParsumError {
    /// Create an invalid configuration error for a worker count
    pub fn invalid_workers(workers: i64) -> Self {
        Self::InvalidConfiguration { workers }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a thread pool error
    pub fn thread_pool(message: impl Into<String>) -> Self {
        Self::ThreadPool {
            message: message.into(),
        }
    }

    /// True for the bad-worker-count error
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}
