//! Tickbench Example Benchmarks
//!
//! Demonstrates the measurement patterns and serves as a template for your
//! own benchmark suite.
//!
//! Run with:
//!   cargo run --release --example benchmarks                 # Run everything
//!   cargo run --release --example benchmarks -- list         # List benchmarks
//!   cargo run --release --example benchmarks -- 'copy_.*'    # Filter by regex
//!   cargo run --release --example benchmarks -- --csv out.csv --svg chart.svg

use tickbench::bench;
use tickbench::prelude::*;

// ============================================================================
// Basic Benchmarks
// ============================================================================

/// Empty measured region: reports the harness floor after the overhead
/// correction.
#[bench]
fn baseline_empty(state: &mut State) {
    state.iter(|| black_box(0u64));
}

/// Simple arithmetic
#[bench]
fn add_numbers(state: &mut State) {
    let x = black_box(42u64);
    let y = black_box(17u64);
    state.iter(|| black_box(x) + black_box(y));
}

// ============================================================================
// Argument Sweeps
// ============================================================================

/// Buffer copy swept across sizes; axis values arrive through `arg(0)`.
#[bench(args = [log_range(1024, 65536, 4.0)])]
fn copy_bytes(state: &mut State) {
    let n = state.arg(0) as usize;
    let src = vec![0xa5u8; n];
    let mut dst = vec![0u8; n];
    state.set_items_processed(n as i64);
    state.iter(|| {
        dst.copy_from_slice(black_box(&src));
        black_box(dst.as_ptr());
    });
}

/// Two axes: haystack length and needle position. Axis 0 varies fastest.
#[bench(args = [linear_range(256, 1024, 256), linear_range(0, 1, 1)])]
fn find_byte(state: &mut State) {
    let len = state.arg(0) as usize;
    let at_end = state.arg(1) == 1;
    let mut haystack = vec![0u8; len];
    if at_end {
        haystack[len - 1] = 1;
    } else {
        haystack[len / 2] = 1;
    }
    state.iter(|| black_box(&haystack).iter().position(|&b| b == 1));
}

// ============================================================================
// Explicit Regions
// ============================================================================

/// Pattern A with pause/resume: setup per iteration stays unmeasured.
#[bench]
fn sort_reversed(state: &mut State) {
    loop {
        state.start();
        state.pause();
        let mut data: Vec<i64> = (0..2048).rev().collect();
        state.resume();
        data.sort();
        state.stop();
        black_box(&data);
        if !state.next() {
            break;
        }
    }
}

fn main() {
    if let Err(e) = tickbench::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
