//! # Tickbench
//!
//! Microbenchmark harness with cycle-level resolution.
//!
//! Tickbench measures user code with the platform timestamp counter,
//! bracketed by memory fences so the code under test cannot drift across
//! the reads, tolerates noisy observations with robust estimators
//! (median, MAD-based outlier rejection), and renders results through
//! pluggable reporters (console table, CSV, SVG chart).
//!
//! ## Quick Start
//!
//! ```ignore
//! use tickbench::prelude::*;
//!
//! #[bench]
//! fn sum_small_vec(state: &mut State) {
//!     let data: Vec<i64> = (0..1000).collect();
//!     state.iter(|| data.iter().sum::<i64>());
//! }
//!
//! fn main() {
//!     if let Err(e) = tickbench::run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! ## Argument sweeps
//!
//! ```ignore
//! #[bench(args = [log_range(1024, 65536, 4.0)])]
//! fn copy_bytes(state: &mut State) {
//!     let n = state.arg(0) as usize;
//!     let src = vec![0u8; n];
//!     let mut dst = vec![0u8; n];
//!     state.iter(|| {
//!         dst.copy_from_slice(black_box(&src));
//!         black_box(&mut dst);
//!     });
//! }
//! ```
//!
//! ## Explicit measurement regions
//!
//! Everything between `start` and `stop` is measured; `pause`/`resume`
//! exclude a span from the current region.
//!
//! ```ignore
//! #[bench]
//! fn sort_fresh_data(state: &mut State) {
//!     loop {
//!         state.start();
//!         state.pause();
//!         let mut data: Vec<i64> = (0..4096).rev().collect(); // not measured
//!         state.resume();
//!         data.sort();
//!         state.stop();
//!         if !state.next() {
//!             break;
//!         }
//!     }
//! }
//! ```

// Re-export core types
pub use tickbench_core::{
    linear_range, log_range, now, pin_to_cpu, setup_environment, ticks_per_second, Entry, State,
    CHUNK_CAPACITY, HAS_CYCLE_COUNTER,
};

// Re-export the registration macro
pub use tickbench_macros::bench;

// Re-export stats
pub use tickbench_stats::{
    apply_filter, median, summarize, DeviationFilter, Summary, MAD_THRESHOLD, SIGMA_THRESHOLD,
};

// Re-export reporters
pub use tickbench_report::{
    ConsoleReporter, CsvReporter, MultiReporter, NullReporter, ReportError, Reporter, Row,
    SvgReporter,
};

// Re-export the driver and CLI
pub use tickbench_cli::{
    default_fixed_overhead, run, run_all, run_entry, run_filtered, run_with_cli, Cli, Options,
    TickConfig,
};

/// Optimizer sink: forces a value to be materialized without letting the
/// optimizer reason about it. One opaque move per call; the cost is a
/// register spill at worst and is covered by the fixed-overhead correction.
pub use std::hint::black_box;

/// Internal re-exports for macro use
#[doc(hidden)]
pub mod internal {
    pub use inventory;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{bench, black_box, linear_range, log_range, DeviationFilter, Options, State};
}
