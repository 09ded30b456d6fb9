//! Streaming CSV output.
//!
//! Wire format, UTF-8 with LF line endings:
//!
//! ```text
//! name,avg,std,min,max,n
//! <name>,<avg>,<std>,<min>,<max>,<n>
//! ```
//!
//! The median column is omitted for compatibility with existing consumers.
//! Names are written raw; callers must not put commas in benchmark names.

use crate::{ReportError, Reporter, Row};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Streaming CSV reporter. The header is written at construction; the file
/// is flushed on finish and closed on drop.
#[derive(Debug)]
pub struct CsvReporter {
    out: BufWriter<File>,
}

impl CsvReporter {
    /// Create (truncating) the output file and write the header.
    ///
    /// An open failure is fatal to the run and is returned for the caller
    /// to abort on.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ReportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        writeln!(out, "name,avg,std,min,max,n")?;
        Ok(CsvReporter { out })
    }
}

impl Reporter for CsvReporter {
    fn write_report(&mut self, name: &str, row: &Row) {
        let _ = writeln!(
            self.out,
            "{},{:.6},{:.6},{},{},{}",
            name, row.mean, row.stddev, row.min, row.max, row.count
        );
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.out.flush().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_rows_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        {
            let mut reporter = CsvReporter::create(&path).unwrap();
            reporter.write_report(
                "copy_bytes/32",
                &Row {
                    median: 12,
                    mean: 12.5,
                    stddev: 0.25,
                    min: 11,
                    max: 19,
                    count: 1000,
                },
            );
            reporter.finish().unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name,avg,std,min,max,n");
        assert_eq!(lines[1], "copy_bytes/32,12.500000,0.250000,11,19,1000");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn open_failure_is_reported() {
        let err = CsvReporter::create("/nonexistent-dir/out.csv").unwrap_err();
        assert!(matches!(err, ReportError::Open { .. }));
    }
}
