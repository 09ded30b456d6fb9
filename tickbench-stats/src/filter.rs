//! Deviation filtering.
//!
//! Timing records are contaminated by interrupts, migrations and frequency
//! excursions. Before the final reduction the driver can discard records
//! that sit implausibly far from the bulk of the sample.

use crate::selection::median;
use crate::{MAD_THRESHOLD, SIGMA_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Which retention predicate to apply before the final reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviationFilter {
    /// Keep every record.
    None,
    /// Keep records within three standard deviations of the mean.
    Sigma,
    /// Keep records within twelve median absolute deviations of the median.
    #[default]
    Mad,
}

impl std::str::FromStr for DeviationFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(DeviationFilter::None),
            "sigma" => Ok(DeviationFilter::Sigma),
            "mad" => Ok(DeviationFilter::Mad),
            other => Err(format!("unknown deviation filter: {other}")),
        }
    }
}

/// Apply `filter` to `records`, returning the retained records in their
/// original order.
pub fn apply_filter(records: &[i64], filter: DeviationFilter) -> Vec<i64> {
    match filter {
        DeviationFilter::None => records.to_vec(),
        DeviationFilter::Sigma => sigma_retain(records),
        DeviationFilter::Mad => mad_retain(records),
    }
}

fn sigma_retain(records: &[i64]) -> Vec<i64> {
    if records.is_empty() {
        return Vec::new();
    }
    let n = records.len() as f64;
    let mean = records.iter().map(|&x| x as f64).sum::<f64>() / n;
    let square_mean = records.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>() / n;
    let stddev = (square_mean - mean * mean).max(0.0).sqrt();

    records
        .iter()
        .copied()
        .filter(|&x| (x as f64 - mean).abs() <= SIGMA_THRESHOLD * stddev)
        .collect()
}

fn mad_retain(records: &[i64]) -> Vec<i64> {
    if records.is_empty() {
        return Vec::new();
    }
    let mut scratch = records.to_vec();
    let m = median(&mut scratch);

    let mut deviations: Vec<i64> = records.iter().map(|&x| (x - m).abs()).collect();
    let mad = median(&mut deviations);

    records
        .iter()
        .copied()
        .filter(|&x| (x - m).abs() <= MAD_THRESHOLD * mad)
        .collect()
}
