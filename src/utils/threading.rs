//! # Threading Configuration
//!
//! ## Role
//! Build the rayon thread pools used by pool dispatch.
//!
//! Pools are built per call and scoped: every pool thread has exited by the
//! time [`with_scoped_pool`] returns, so nothing outlives one summation.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{ParsumError, Result};

/// Run `f` on a fresh pool of exactly `n_threads` named threads.
pub fn with_scoped_pool<R>(n_threads: usize, f: impl FnOnce(&ThreadPool) -> R) -> Result<R> {
    ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("parsum-pool-{}", i))
        .build_scoped(|thread| thread.run(), f)
        .map_err(|e| ParsumError::thread_pool(format!("Failed to create thread pool: {}", e)))
}
