//! Discarding sink.

use crate::{Reporter, Row};

/// Reporter that drops every row. Useful for timing the harness itself.
#[derive(Debug, Default)]
pub struct NullReporter;

impl NullReporter {
    /// A fresh null sink.
    pub fn new() -> Self {
        NullReporter
    }
}

impl Reporter for NullReporter {
    fn write_report(&mut self, _name: &str, _row: &Row) {}
}
