#![warn(missing_docs)]
//! Tickbench CLI Library
//!
//! CLI infrastructure for benchmark binaries. Use `tickbench::run()` in your
//! benchmark binary's `main()` to get argument parsing, `tick.toml`
//! discovery, reporter wiring and the full driver.
//!
//! # Example
//!
//! ```ignore
//! use tickbench::prelude::*;
//!
//! #[bench]
//! fn my_benchmark(state: &mut State) {
//!     state.iter(|| expensive_operation());
//! }
//!
//! fn main() {
//!     if let Err(e) = tickbench::run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

mod config;
mod driver;

pub use config::{OutputConfig, RunnerConfig, TickConfig};
pub use driver::{default_fixed_overhead, run_all, run_entry, run_filtered, Options};

use anyhow::Context;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;
use tickbench_core::Entry;
use tickbench_report::{
    ConsoleReporter, CsvReporter, MultiReporter, NullReporter, Reporter, SvgReporter,
};
use tickbench_stats::DeviationFilter;

/// Tickbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "tickbench")]
#[command(author, version, about = "Tickbench - cycle-resolution microbenchmark harness")]
pub struct Cli {
    /// Optional subcommand; defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter benchmarks by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Per-point time budget in seconds
    #[arg(long)]
    pub max_time: Option<f64>,

    /// Outlier rejection: none, sigma, mad
    #[arg(long)]
    pub deviation_filter: Option<String>,

    /// Ticks subtracted from reported aggregates
    #[arg(long)]
    pub fixed_overhead: Option<i64>,

    /// Write a CSV report to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write an SVG chart to this path
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Suppress the console table
    #[arg(long)]
    pub no_console: bool,

    /// Add a discarding reporter (times the harness itself)
    #[arg(long)]
    pub null: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all discovered benchmarks
    List,
    /// Run benchmarks (default)
    Run,
}

/// Run the Tickbench CLI with the given arguments.
/// This is the main entry point for benchmark binaries.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Tickbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("tickbench=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("tickbench=info")
            .init();
    }

    // Discover tick.toml configuration (CLI flags override)
    let config = TickConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::List) => list_entries(&cli),
        Some(Commands::Run) | None => run_benchmarks(&cli, &config),
    }
}

/// Layer flags over file configuration into the run options.
fn build_options(cli: &Cli, config: &TickConfig) -> anyhow::Result<Options> {
    let deviation_filter = match &cli.deviation_filter {
        Some(text) => text
            .parse::<DeviationFilter>()
            .map_err(|e| anyhow::anyhow!(e))?,
        None => config.runner.deviation_filter,
    };
    Ok(Options {
        max_time: cli.max_time.unwrap_or(config.runner.max_time),
        deviation_filter,
        fixed_overhead: cli
            .fixed_overhead
            .or(config.runner.fixed_overhead)
            .unwrap_or_else(default_fixed_overhead),
    })
}

/// Compose the reporter fan-out from flags and configuration.
fn build_reporter(cli: &Cli, config: &TickConfig) -> anyhow::Result<MultiReporter> {
    let mut children: Vec<Box<dyn Reporter>> = Vec::new();

    if !cli.no_console && config.output.console {
        children.push(Box::new(ConsoleReporter::new()));
    }
    if let Some(path) = cli
        .csv
        .clone()
        .or_else(|| config.output.csv.as_ref().map(PathBuf::from))
    {
        let reporter =
            CsvReporter::create(&path).with_context(|| format!("csv output {}", path.display()))?;
        children.push(Box::new(reporter));
    }
    if let Some(path) = cli
        .svg
        .clone()
        .or_else(|| config.output.svg.as_ref().map(PathBuf::from))
    {
        let reporter =
            SvgReporter::create(&path).with_context(|| format!("svg output {}", path.display()))?;
        children.push(Box::new(reporter));
    }
    if cli.null || children.is_empty() {
        children.push(Box::new(NullReporter::new()));
    }

    Ok(MultiReporter::new(children))
}

fn run_benchmarks(cli: &Cli, config: &TickConfig) -> anyhow::Result<()> {
    let filter = Regex::new(&cli.filter).context("invalid filter regex")?;
    let options = build_options(cli, config)?;
    let mut reporter = build_reporter(cli, config)?;

    tracing::debug!(
        max_time = options.max_time,
        filter = ?options.deviation_filter,
        overhead = options.fixed_overhead,
        "starting run"
    );

    run_filtered(Some(&filter), &options, &mut reporter);
    reporter.finish()?;
    Ok(())
}

fn list_entries(cli: &Cli) -> anyhow::Result<()> {
    let filter = Regex::new(&cli.filter).context("invalid filter regex")?;

    let mut total = 0;
    for entry in inventory::iter::<Entry> {
        if !filter.is_match(entry.name) {
            continue;
        }
        let points: usize = entry.axes.iter().map(Vec::len).product();
        if entry.axes.is_empty() {
            println!("{}", entry.name);
        } else {
            println!("{} ({} axes, {} points)", entry.name, entry.axes.len(), points);
        }
        total += 1;
    }
    println!("{} benchmarks found.", total);
    Ok(())
}
