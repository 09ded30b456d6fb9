//! Fixed-width console table.

use crate::{Reporter, Row};
use std::io::{self, Write};

/// Streaming console reporter. The header and separator are emitted at
/// construction; each row becomes one line with right-aligned numeric
/// columns (name 28, med 10, avg 10, std 6, n 9).
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter writing to stdout.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ConsoleReporter<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to an arbitrary sink.
    pub fn with_writer(mut out: W) -> Self {
        let _ = writeln!(out, "{:>28} {:>10} {:>10} {:>6} {:>9}", "name", "med", "avg", "std", "n");
        let _ = writeln!(out, "{}", "-".repeat(67));
        ConsoleReporter { out }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn write_report(&mut self, name: &str, row: &Row) {
        let _ = writeln!(
            self.out,
            "{:>28} {:>10} {:>10.0} {:>6.0} {:>9}",
            name, row.median, row.mean, row.stddev, row.count
        );
    }

    fn finish(&mut self) -> Result<(), crate::ReportError> {
        self.out.flush().map_err(Into::into)
    }
}
