//! Fan-out reporter.

use crate::{ReportError, Reporter, Row};

/// Owns a list of child reporters and forwards every row to each of them in
/// registration order. Children are dropped with the composite.
pub struct MultiReporter {
    children: Vec<Box<dyn Reporter>>,
}

impl MultiReporter {
    /// Composite over `children`; forwarding order is the vector order.
    pub fn new(children: Vec<Box<dyn Reporter>>) -> Self {
        MultiReporter { children }
    }

    /// Append a child. It receives only rows reported after this call.
    pub fn push(&mut self, child: Box<dyn Reporter>) {
        self.children.push(child);
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the composite has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Reporter for MultiReporter {
    fn write_report(&mut self, name: &str, row: &Row) {
        for child in &mut self.children {
            child.write_report(name, row);
        }
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        let mut first_error = None;
        for child in &mut self.children {
            if let Err(e) = child.finish() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
