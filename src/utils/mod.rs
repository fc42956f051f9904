//! # Utilities Module
//!
//! ## Role
//! Cross-cutting helpers that don't belong in domain-specific modules.
//!
//! ## Sub-modules
//! - `threading`: Rayon thread pool configuration

pub mod threading;
