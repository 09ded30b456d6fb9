#![warn(missing_docs)]
//! Tickbench Reporters
//!
//! A reporter consumes one [`Row`] per reported result. Five variants:
//! - [`ConsoleReporter`] - streaming fixed-width table on stdout
//! - [`CsvReporter`] - streaming `name,avg,std,min,max,n` file
//! - [`SvgReporter`] - buffered log-scale bar chart, written on finish
//! - [`NullReporter`] - discards everything
//! - [`MultiReporter`] - fans rows out to a list of children in order

mod console;
mod csv;
mod multi;
mod null;
mod svg;

pub use console::ConsoleReporter;
pub use csv::CsvReporter;
pub use multi::MultiReporter;
pub use null::NullReporter;
pub use svg::SvgReporter;

use std::path::PathBuf;

/// One reported result, in ticks. `median`, `min` and `max` are integer
/// ticks; `mean` and `stddev` are fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// Median of the retained records.
    pub median: i64,
    /// Mean of the retained records.
    pub mean: f64,
    /// Population standard deviation of the retained records.
    pub stddev: f64,
    /// Smallest retained record.
    pub min: i64,
    /// Largest retained record.
    pub max: i64,
    /// Number of retained records.
    pub count: i64,
}

/// Reporter output failure.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The output path could not be opened. Fatal by contract: the caller
    /// is expected to abort the run.
    #[error("failed to open report output {path}: {source}")]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Writing buffered output failed.
    #[error("failed to write report output: {0}")]
    Write(#[from] std::io::Error),
}

/// Sink for reported rows.
pub trait Reporter {
    /// Consume one result row.
    fn write_report(&mut self, name: &str, row: &Row);

    /// Flush buffered output. Called once after the last row; reporters that
    /// buffer (SVG) emit their document here.
    fn finish(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}
