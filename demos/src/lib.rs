//! Demo benchmark suites for Tickbench.
//!
//! This crate is not published — it exists solely to host runnable examples
//! that depend on `tickbench`.
//!
//! Run the suite with:
//! ```sh
//! cargo run --release --example benchmarks
//! ```
