//! # Partitioned Reduction Engine
//!
//! ## Role
//! Sum every element of a matrix as the ordered sum of `n` partial sums,
//! each computed concurrently on its own worker.
//!
//! ## Lifecycle (per call)
//! ```text
//! flatten -> partition -> dispatch -> join -> reduce
//! ```
//! - **flatten**: single-threaded, before any worker exists.
//! - **partition**: `n` chunks, see [`super::partition`]. One result slot per
//!   chunk is reserved up front; a count that cannot be reserved fails the
//!   call before any worker starts.
//! - **dispatch**: exactly `n` workers, one per chunk, spawned fresh.
//! - **join**: blocks on workers in chunk order `0..n`.
//! - **reduce**: left fold of the partial sums in chunk order.
//!
//! Completion order of workers does not matter; the reduce order is fixed,
//! so a given `(matrix, n)` always yields a bit-identical total. No state is
//! kept between calls and all workers are retired before a call returns.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use tracing::instrument;

use super::partition::Partition;
use super::worker::{chunk_sum, join_worker, CompletionSlot, TraceContext};
use super::SumMatrix;
use crate::data::flatten;
use crate::error::{ParsumError, Result};
use crate::utils::threading::with_scoped_pool;

/// How the `n` chunk computations are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Dispatch {
    /// One named OS thread per chunk, inside a thread scope
    #[default]
    Threads,
    /// One rayon task per chunk on a fresh pool of `n` threads
    Pool,
}

impl Dispatch {
    pub fn as_str(self) -> &'static str {
        match self {
            Dispatch::Threads => "threads",
            Dispatch::Pool => "pool",
        }
    }
}

/// Parallel matrix summation over a fixed worker count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkedSum {
    workers: NonZeroUsize,
    dispatch: Dispatch,
}

impl ChunkedSum {
    /// Validate the worker count. Anything below one is rejected before any
    /// work is done.
    pub fn new(workers: i64) -> Result<Self> {
        let n = usize::try_from(workers)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| ParsumError::invalid_workers(workers))?;
        Ok(Self::with_workers(n))
    }

    pub fn with_workers(workers: NonZeroUsize) -> Self {
        Self {
            workers,
            dispatch: Dispatch::default(),
        }
    }

    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    #[inline]
    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    #[inline]
    pub fn dispatch_mode(&self) -> Dispatch {
        self.dispatch
    }

    /// Chunks this engine would use for `total` elements
    pub fn partition_for(&self, total: usize) -> Partition {
        Partition::new(total, self.workers)
    }
}

impl SumMatrix for ChunkedSum {
    fn name(&self) -> &'static str {
        "chunked"
    }

    #[instrument(
        name = "chunked_sum",
        skip_all,
        fields(workers = self.workers.get(), dispatch = self.dispatch.as_str(), elements)
    )]
    fn sum_rows<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<f64> {
        let flat = flatten(rows);
        tracing::Span::current().record("elements", flat.len());

        let partition = self.partition_for(flat.len());
        tracing::trace!(
            chunk_size = partition.chunk_size(),
            nonempty = partition.n_nonempty(),
            "partitioned"
        );

        let mut partials = reserve_slots(&partition)?;
        match self.dispatch {
            Dispatch::Threads => run_threads(&flat, &partition, &mut partials)?,
            Dispatch::Pool => run_pool(flat, &partition, &mut partials)?,
        }
        Ok(reduce(&partials))
    }
}

/// Sum partial results strictly in chunk order.
#[inline]
fn reduce(partials: &[f64]) -> f64 {
    partials.iter().fold(0.0, |acc, &partial| acc + partial)
}

/// Empty vector with room for one entry per chunk.
fn reserve_slots<T>(partition: &Partition) -> Result<Vec<T>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(partition.len())
        .map_err(|source| ParsumError::ResourceExhausted {
            workers: partition.len(),
            source,
        })?;
    Ok(slots)
}

fn run_threads(flat: &[f64], partition: &Partition, partials: &mut Vec<f64>) -> Result<()> {
    let ctx = TraceContext::current();
    let ctx = &ctx;
    thread::scope(|scope| {
        let mut handles = reserve_slots(partition)?;
        for chunk in partition.chunks() {
            // Already-spawned workers are joined by the scope if this fails.
            let handle = thread::Builder::new()
                .name(format!("parsum-worker-{}", chunk.index))
                .spawn_scoped(scope, move || ctx.in_scope(|| chunk_sum(flat, &chunk)))
                .map_err(|source| ParsumError::WorkerSpawn {
                    chunk: chunk.index,
                    source,
                })?;
            handles.push(handle);
        }
        partials.extend(handles.into_iter().map(join_worker));
        Ok(())
    })
}

fn run_pool(flat: Vec<f64>, partition: &Partition, partials: &mut Vec<f64>) -> Result<()> {
    let flat: Arc<[f64]> = flat.into();
    let ctx = TraceContext::current();
    let mut slots: Vec<Arc<CompletionSlot>> = reserve_slots(partition)?;
    with_scoped_pool(partition.len(), |pool| {
        for chunk in partition.chunks() {
            let slot = Arc::new(CompletionSlot::new());
            let published = Arc::clone(&slot);
            let flat = Arc::clone(&flat);
            let ctx = ctx.clone();
            pool.spawn(move || published.publish(ctx.in_scope(|| chunk_sum(&flat, &chunk))));
            slots.push(slot);
        }
        partials.extend(slots.iter().map(|slot| slot.wait()));
    })
}

/// Sum all elements of `rows` with `workers` concurrent chunk workers.
///
/// Fails with [`ParsumError::InvalidConfiguration`] when `workers < 1`, and
/// with [`ParsumError::ResourceExhausted`] when `workers` is too large to
/// reserve a result slot per worker. Thread creation failures surface as
/// spawn or pool errors.
pub fn sum<R: AsRef<[f64]>>(rows: &[R], workers: i64) -> Result<f64> {
    ChunkedSum::new(workers)?.sum_rows(rows)
}
