//! The driver: argument sweeps and the State lifecycle.
//!
//! For each entry the driver expands the cartesian product of its argument
//! axes little-endian (axis 0 varies fastest), runs the user function once
//! per tuple on a fresh `State`, reduces the harvested records and hands a
//! row to the reporter.

use regex::Regex;
use tickbench_core::{setup_environment, Entry, State};
use tickbench_report::{Reporter, Row};
use tickbench_stats::{summarize, DeviationFilter, Summary};

/// Configuration for one run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Per-point time budget in seconds.
    pub max_time: f64,
    /// Outlier rejection applied before the final reduction.
    pub deviation_filter: DeviationFilter,
    /// Ticks subtracted from median, mean, min and max to cancel the
    /// timestamp read's own cost.
    pub fixed_overhead: i64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_time: 0.5,
            deviation_filter: DeviationFilter::default(),
            fixed_overhead: default_fixed_overhead(),
        }
    }
}

/// Platform default for the per-iteration measurement cost, in ticks.
/// Empirically recalibrate when the reported floor looks wrong.
pub fn default_fixed_overhead() -> i64 {
    if cfg!(target_arch = "x86_64") {
        48
    } else {
        0
    }
}

fn row_from(summary: Summary) -> Row {
    Row {
        median: summary.median,
        mean: summary.mean,
        stddev: summary.stddev,
        min: summary.min,
        max: summary.max,
        count: summary.count,
    }
}

/// Run one point of the sweep on a fresh state and reduce its records.
fn run_point(entry: &Entry, tuple: &[i64], options: &Options) -> Row {
    let mut state = State::new();
    state.set_max_time(options.max_time);
    state.set_args(tuple.to_vec());

    (entry.func)(&mut state);

    if state.items_processed() > 0 {
        tracing::debug!(
            name = entry.name,
            items = state.items_processed(),
            iterations = state.iterations(),
            "throughput hint"
        );
    }

    let records: Vec<i64> = state.records().collect();
    row_from(summarize(&records, options.deviation_filter, options.fixed_overhead))
}

/// Run every tuple of one entry's argument sweep, reporting one row per
/// tuple. A zero-axis entry reports a single row under its base name.
pub fn run_entry(entry: &Entry, options: &Options, reporter: &mut dyn Reporter) {
    if entry.axes.is_empty() {
        let row = run_point(entry, &[], options);
        reporter.write_report(entry.name, &row);
        return;
    }
    if entry.axes.iter().any(|axis| axis.is_empty()) {
        tracing::warn!(name = entry.name, "skipping entry with an empty argument axis");
        return;
    }

    let mut indices = vec![0usize; entry.axes.len()];
    loop {
        let tuple: Vec<i64> = indices
            .iter()
            .zip(&entry.axes)
            .map(|(&i, axis)| axis[i])
            .collect();

        let mut display = entry.name.to_string();
        for value in &tuple {
            display.push('/');
            display.push_str(&value.to_string());
        }

        let row = run_point(entry, &tuple, options);
        reporter.write_report(&display, &row);

        // Little-endian odometer: axis 0 varies fastest.
        let mut done = true;
        for (index, axis) in indices.iter_mut().zip(&entry.axes) {
            *index += 1;
            if *index >= axis.len() {
                *index = 0;
            } else {
                done = false;
                break;
            }
        }
        if done {
            break;
        }
    }
}

/// Run every registered entry whose name matches `filter` (all of them when
/// `filter` is `None`), after preparing the environment once.
pub fn run_filtered(filter: Option<&Regex>, options: &Options, reporter: &mut dyn Reporter) {
    setup_environment();
    for entry in inventory::iter::<Entry> {
        if filter.map_or(true, |re| re.is_match(entry.name)) {
            tracing::debug!(name = entry.name, axes = entry.axes.len(), "running entry");
            run_entry(entry, options, reporter);
        }
    }
}

/// Run every registered entry.
pub fn run_all(options: &Options, reporter: &mut dyn Reporter) {
    run_filtered(None, options, reporter);
}
