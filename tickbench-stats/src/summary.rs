//! Per-invocation summary reduction.
//!
//! Four phases: full-sample reduction, deviation filtering with
//! re-reduction, order-statistic median over the retained records, and
//! fixed-overhead correction. The median deliberately comes after the
//! filter so a surviving tail cannot skew it.

use crate::filter::{apply_filter, DeviationFilter};
use crate::selection::median;

/// Reduced statistics of one benchmark invocation, in ticks.
///
/// `median`, `min` and `max` are integer ticks; `mean` and `stddev` are
/// fractional. `count` is the number of records that survived filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
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

impl Summary {
    fn zero() -> Self {
        Summary {
            median: 0,
            mean: 0.0,
            stddev: 0.0,
            min: 0,
            max: 0,
            count: 0,
        }
    }
}

struct Reduction {
    count: i64,
    mean: f64,
    stddev: f64,
    min: i64,
    max: i64,
}

fn reduce(records: &[i64]) -> Reduction {
    let mut count = 0i64;
    let mut sum = 0.0f64;
    let mut square_sum = 0.0f64;
    let mut min = i64::MAX;
    let mut max = i64::MIN;
    for &x in records {
        sum += x as f64;
        square_sum += (x as f64) * (x as f64);
        min = min.min(x);
        max = max.max(x);
        count += 1;
    }
    let mean = sum / count as f64;
    let square_mean = square_sum / count as f64;
    Reduction {
        count,
        mean,
        stddev: (square_mean - mean * mean).max(0.0).sqrt(),
        min,
        max,
    }
}

/// Reduce raw records into a [`Summary`].
///
/// An empty record set (a user function that never called start/stop)
/// produces an all-zero summary with `count == 0`; nothing here divides by
/// the count without guarding it first.
pub fn summarize(records: &[i64], filter: DeviationFilter, fixed_overhead: i64) -> Summary {
    if records.is_empty() {
        return Summary::zero();
    }

    let retained;
    let retained_records: &[i64] = match filter {
        DeviationFilter::None => records,
        _ => {
            retained = apply_filter(records, filter);
            &retained
        }
    };
    if retained_records.is_empty() {
        return Summary::zero();
    }

    let reduction = reduce(retained_records);

    let mut scratch = retained_records.to_vec();
    let med = median(&mut scratch);

    // The overhead correction cancels the timestamp read's own cost; it
    // applies to location statistics only, never to spread or count.
    Summary {
        median: med - fixed_overhead,
        mean: reduction.mean - fixed_overhead as f64,
        stddev: reduction.stddev,
        min: reduction.min - fixed_overhead,
        max: reduction.max - fixed_overhead,
        count: reduction.count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_reduction() {
        // count=10, median=(5+6)/2=5 by integer division, min=1, max=10
        let records = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let s = summarize(&records, DeviationFilter::None, 0);
        assert_eq!(s.count, 10);
        assert_eq!(s.median, 5);
        assert_eq!(s.min, 1);
        assert_eq!(s.max, 10);
        assert!((s.mean - 5.5).abs() < 1e-9);
        // population stddev of 1..=10 is sqrt(8.25)
        assert!((s.stddev - 8.25f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn mad_filter_cancels_the_outlier() {
        let records = vec![10, 10, 10, 10, 10, 10, 10, 10, 10, 1_000_000];
        let s = summarize(&records, DeviationFilter::Mad, 0);
        assert_eq!(s.count, 9);
        assert_eq!(s.median, 10);
        assert!((s.mean - 10.0).abs() < 1e-9);
        assert_eq!(s.max, 10);
        assert!(s.stddev.abs() < 1e-9);
    }

    #[test]
    fn median_is_computed_after_filtering() {
        // Without the filter the outlier shifts the even-count median; with
        // it the median must come from the retained records only.
        let records = vec![1, 2, 3, 1_000_000];
        let s = summarize(&records, DeviationFilter::Mad, 0);
        assert_eq!(s.count, 3);
        assert_eq!(s.median, 2);
    }

    #[test]
    fn overhead_corrects_location_not_spread() {
        let records = vec![100, 110, 120];
        let s = summarize(&records, DeviationFilter::None, 40);
        assert_eq!(s.median, 70);
        assert_eq!(s.min, 60);
        assert_eq!(s.max, 80);
        assert!((s.mean - 70.0).abs() < 1e-9);
        let raw = summarize(&records, DeviationFilter::None, 0);
        assert!((s.stddev - raw.stddev).abs() < 1e-12);
        assert_eq!(s.count, raw.count);
    }

    #[test]
    fn empty_sample_is_all_zero() {
        let s = summarize(&[], DeviationFilter::Mad, 48);
        assert_eq!(s.count, 0);
        assert_eq!(s.median, 0);
        assert_eq!(s.min, 0);
        assert_eq!(s.max, 0);
        assert!(s.mean.abs() < f64::EPSILON);
        assert!(s.stddev.abs() < f64::EPSILON);
    }

    #[test]
    fn singleton_sample() {
        let s = summarize(&[42], DeviationFilter::Sigma, 0);
        assert_eq!(s.count, 1);
        assert_eq!(s.median, 42);
        assert_eq!(s.min, 42);
        assert_eq!(s.max, 42);
    }
}
