//! # Chunk Workers
//!
//! ## Role
//! One worker sums exactly one chunk of the flattened sequence and hands back
//! a single partial sum. Workers share the flattened sequence read-only and
//! never touch each other's results.
//!
//! ## Result Handoff
//! - Thread dispatch: the worker's return value is its result slot, and
//!   joining the thread is the visibility barrier.
//! - Pool dispatch: the worker publishes into its own [`CompletionSlot`] and
//!   the joiner waits on it. Condvar waits may return without a value
//!   (spurious wakeup); those are retried, never reported.
//!
//! ## Tracing
//! Worker threads do not inherit the caller's subscriber. [`TraceContext`]
//! carries the caller's dispatcher and current span onto each worker so the
//! per-chunk events land where the caller is listening.

use std::panic;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::ScopedJoinHandle;

use tracing::{Dispatch, Span};

use super::partition::Chunk;

/// Sum the clipped range of `chunk` over `flat`, left to right from `0.0`.
pub fn chunk_sum(flat: &[f64], chunk: &Chunk) -> f64 {
    let range = chunk.clipped(flat.len());
    if range.is_empty() {
        tracing::debug!(
            chunk = chunk.index,
            start = chunk.start,
            len = range.len(),
            "empty chunk"
        );
        return 0.0;
    }
    tracing::debug!(
        chunk = chunk.index,
        start = range.start,
        end = range.end - 1,
        len = range.len(),
        "working from position {} to position {}",
        range.start,
        range.end - 1
    );
    flat[range].iter().fold(0.0, |acc, &x| acc + x)
}

/// Subscriber and parent span of the dispatching thread.
#[derive(Clone, Debug)]
pub struct TraceContext {
    dispatch: Dispatch,
    parent: Span,
}

impl TraceContext {
    /// Capture the calling thread's context.
    pub fn current() -> Self {
        Self {
            dispatch: tracing::dispatcher::get_default(Dispatch::clone),
            parent: Span::current(),
        }
    }

    /// Run `f` with the captured subscriber as default, inside the parent span.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, || self.parent.in_scope(f))
    }
}

/// Join a worker thread and return its partial sum.
///
/// A worker panic is re-raised on the joining thread.
pub fn join_worker(handle: ScopedJoinHandle<'_, f64>) -> f64 {
    match handle.join() {
        Ok(partial) => partial,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Single-use result slot written by one worker, read by one joiner.
#[derive(Debug, Default)]
pub struct CompletionSlot {
    value: Mutex<Option<f64>>,
    ready: Condvar,
}

impl CompletionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the partial sum and wake the joiner.
    pub fn publish(&self, partial: f64) {
        let mut guard = self.lock();
        debug_assert!(guard.is_none(), "completion slot published twice");
        *guard = Some(partial);
        drop(guard);
        self.ready.notify_all();
    }

    /// Block until the partial sum is published.
    ///
    /// Never gives up: a wakeup that finds the slot empty just waits again.
    pub fn wait(&self) -> f64 {
        let mut guard = self.lock();
        loop {
            if let Some(partial) = *guard {
                return partial;
            }
            guard = self
                .ready
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<f64>> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
