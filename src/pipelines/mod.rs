//! # Pipeline Module
//!
//! High-level orchestration of the summation workflow.
//! Coordinates input loading, engine execution and reporting.

pub mod summation;

pub use summation::{SequentialRun, SummationPipeline, SummationReport};
