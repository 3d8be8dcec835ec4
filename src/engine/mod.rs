// src/engine/mod.rs

//! Periodic collection for the `chronystat` binary.
//!
//! The parsing core knows nothing about time; [`runtime::Runtime`] calls
//! [`Collector::gather`](crate::chrony::Collector::gather) on a fixed
//! interval, logs failed cycles and keeps going until shutdown.

use std::time::Duration;

pub mod runtime;

pub use runtime::Runtime;

/// Runtime options for the collection loop.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Time between the starts of two cycles.
    pub interval: Duration,
    /// Stop after this many cycles (successful or not). `None` runs until
    /// shutdown.
    pub max_cycles: Option<u64>,
}

/// Outcome counts of a finished runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    pub cycles: u64,
    pub failed: u64,
    pub records: u64,
}
