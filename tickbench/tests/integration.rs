//! Integration tests for Tickbench
//!
//! These tests verify the end-to-end behavior of the harness: macro
//! registration, the argument sweep driver, record collection under a real
//! time budget, and reporter output.

use tickbench::bench;
use tickbench::prelude::*;
use tickbench::{
    run_entry, ticks_per_second, CsvReporter, Entry, Reporter, Row, SvgReporter,
};

#[bench]
fn spin_nothing(state: &mut State) {
    state.iter(|| black_box(0u64));
}

#[bench(args = [linear_range(32, 512, 96)])]
fn sweep_linear(state: &mut State) {
    let n = state.arg(0);
    state.iter(|| black_box(n) + 1);
}

#[bench(name = "pairs", args = [linear_range(1, 2, 1), linear_range(10, 20, 10)])]
fn sweep_pairs(state: &mut State) {
    let a = state.arg(0);
    let b = state.arg(1);
    state.iter(|| black_box(a * b));
}

struct Collecting {
    rows: Vec<(String, Row)>,
}

impl Reporter for Collecting {
    fn write_report(&mut self, name: &str, row: &Row) {
        self.rows.push((name.to_string(), *row));
    }
}

fn find_entry(name: &str) -> &'static Entry {
    tickbench::internal::inventory::iter::<Entry>
        .into_iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("entry {name} not registered"))
}

fn quick_options() -> Options {
    Options {
        max_time: 0.05,
        deviation_filter: DeviationFilter::Mad,
        fixed_overhead: 0,
    }
}

#[test]
fn macro_registers_axes() {
    let entry = find_entry("sweep_linear");
    assert_eq!(entry.axes, vec![vec![32, 128, 224, 320, 416, 512]]);

    let pairs = find_entry("pairs");
    assert_eq!(pairs.axes, vec![vec![1, 2], vec![10, 20]]);

    assert!(find_entry("spin_nothing").axes.is_empty());
}

#[test]
fn empty_body_produces_records() {
    let entry = find_entry("spin_nothing");
    let mut reporter = Collecting { rows: Vec::new() };
    run_entry(entry, &quick_options(), &mut reporter);

    assert_eq!(reporter.rows.len(), 1);
    let (name, row) = &reporter.rows[0];
    assert_eq!(name, "spin_nothing");
    assert!(row.count > 0);
    assert!(row.min <= row.median);
    assert!(row.median <= row.max);
}

#[test]
fn one_axis_rows_arrive_in_axis_order() {
    let entry = Entry {
        name: "sized",
        func: |state| {
            let n = state.arg(0);
            state.iter(|| black_box(n));
        },
        axes: vec![vec![32, 128, 512]],
    };
    let mut reporter = Collecting { rows: Vec::new() };
    run_entry(&entry, &quick_options(), &mut reporter);

    let names: Vec<&str> = reporter.rows.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["sized/32", "sized/128", "sized/512"]);
}

#[test]
fn two_axis_sweep_varies_axis_zero_fastest() {
    let entry = find_entry("pairs");
    let mut reporter = Collecting { rows: Vec::new() };
    run_entry(entry, &quick_options(), &mut reporter);

    let names: Vec<&str> = reporter.rows.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["pairs/1/10", "pairs/2/10", "pairs/1/20", "pairs/2/20"]);
}

#[test]
fn csv_run_writes_header_plus_one_line_per_point() {
    let entry = Entry {
        name: "csv_sweep",
        func: |state| {
            state.iter(|| black_box(1u64));
        },
        axes: vec![vec![32, 128, 512]],
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.csv");
    {
        let mut reporter = CsvReporter::create(&path).unwrap();
        run_entry(&entry, &quick_options(), &mut reporter);
        reporter.finish().unwrap();
    }

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "name,avg,std,min,max,n");
    assert!(lines[1].starts_with("csv_sweep/32,"));
    assert!(lines[2].starts_with("csv_sweep/128,"));
    assert!(lines[3].starts_with("csv_sweep/512,"));
    // <name>,<avg>,<std>,<min>,<max>,<n>
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), 6);
    }
}

#[test]
fn svg_run_draws_one_bar_per_point() {
    let entry = find_entry("sweep_linear");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    {
        let mut reporter = SvgReporter::create(&path).unwrap();
        run_entry(entry, &quick_options(), &mut reporter);
        reporter.finish().unwrap();
    }

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("<svg viewBox=\"0 0 1920 1080\""));
    assert_eq!(text.matches("<rect class=\"bar\"").count(), 6);
    assert!(text.contains("sweep_linear/32"));
    assert!(text.contains("sweep_linear/512"));
}

#[test]
fn budget_overrun_is_bounded_by_one_iteration() {
    let mut state = State::new();
    state.set_max_time(0.02);
    state.iter(|| black_box(7u64) * 3);

    let budget = (0.02 * ticks_per_second() as f64) as i64;
    let longest = state.records().max().unwrap_or(0);
    assert!(state.total_ticks() > budget);
    assert!(
        state.total_ticks() <= budget + longest,
        "total = {}, budget = {}, longest = {}",
        state.total_ticks(),
        budget,
        longest
    );
}

#[test]
fn elapsed_equals_sum_of_records() {
    let mut state = State::new();
    state.set_max_time(0.01);
    state.iter(|| black_box(2u64) + 2);

    let sum: i64 = state.records().sum();
    assert_eq!(state.total_ticks(), sum);
    assert_eq!(state.iterations(), state.records().count() as i64);
}
