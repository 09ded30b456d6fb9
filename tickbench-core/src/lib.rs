#![warn(missing_docs)]
//! Tickbench Core - Measurement Runtime
//!
//! This crate provides the execution environment for benchmarks:
//! - `State` struct with the fence-bracketed measurement loop
//! - High-precision tick counter (TSC / CNTVCT_EL0 with Instant fallback)
//! - Chunked record storage that never moves a stored record
//! - CPU affinity, scheduling class and governor setup
//! - Linear and logarithmic argument axis generators

mod clock;
mod env;
mod ranges;
mod state;

pub use clock::{lfence, mfence, now, sfence, ticks_per_second, HAS_CYCLE_COUNTER};
pub use env::{pin_to_cpu, setup_environment};
pub use ranges::{linear_range, log_range};
pub use state::{State, CHUNK_CAPACITY};

/// Benchmark registered via `#[tickbench::bench]`.
///
/// Entries are installed through `inventory` before the driver runs and live
/// for the process lifetime. Each axis is one ordered list of argument
/// values; the driver sweeps the cartesian product of all axes.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Human-readable base name; argument values are appended as `/<v>`.
    pub name: &'static str,
    /// The benchmark body. Takes exclusive use of the state for one
    /// point of the argument sweep.
    pub func: fn(&mut State),
    /// Argument axes; empty for a zero-argument benchmark.
    pub axes: Vec<Vec<i64>>,
}

inventory::collect!(Entry);

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<Entry> {}
};
