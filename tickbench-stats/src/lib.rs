#![warn(missing_docs)]
//! Tickbench Statistical Engine
//!
//! Reduces the raw per-iteration tick records of one benchmark invocation
//! into a compact summary:
//! - full-sample reduction (count, mean, population stddev, min, max)
//! - deviation filtering (3-sigma or 12-MAD) with re-reduction
//! - order-statistic median over the retained records
//! - fixed-overhead correction for the timestamp read's own cost

mod filter;
mod selection;
mod summary;

pub use filter::{apply_filter, DeviationFilter};
pub use selection::median;
pub use summary::{summarize, Summary};

/// Retention threshold of the sigma filter, in standard deviations.
pub const SIGMA_THRESHOLD: f64 = 3.0;

/// Retention threshold of the MAD filter, in median absolute deviations.
/// Deliberately permissive: timing noise is heavy-tailed.
pub const MAD_THRESHOLD: i64 = 12;
