//! Descriptive statistics over plain value slices.
//!
//! Every function returns `None` where the statistic is undefined instead of
//! producing NaN, so callers decide the policy explicitly.

use std::collections::BTreeMap;

/// Summary of one group of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (ddof = 1); `None` for fewer than two values.
    pub std: Option<f64>,
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample variance (ddof = 1).
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(sum_sq / (n - 1) as f64)
}

/// Sample standard deviation (ddof = 1).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Most frequent value; the smallest one when several share the top count.
pub fn mode(values: &[i64]) -> Option<i64> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    // BTreeMap iterates ascending, so keeping the first maximum yields the smallest mode.
    counts
        .into_iter()
        .fold(None, |best: Option<(i64, usize)>, (value, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value, count)),
        })
        .map(|(value, _)| value)
}

/// Compute the full summary of a group; `None` when the group is empty.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    let min = values.iter().copied().min_by(f64::total_cmp)?;
    let max = values.iter().copied().max_by(f64::total_cmp)?;

    Some(Summary {
        count: values.len(),
        mean: mean(values)?,
        median: median(values)?,
        min,
        max,
        std: sample_std(values),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== mean / median tests ====================

    #[test]
    fn test_mean_median_basic() {
        let values = [10.0, 20.0, 20.0, 30.0];
        assert_eq!(mean(&values), Some(20.0));
        assert_eq!(median(&values), Some(20.0));
    }

    #[test]
    fn test_median_odd_length_unsorted() {
        assert_eq!(median(&[9.0, 1.0, 5.0]), Some(5.0));
    }

    #[test]
    fn test_median_even_length_averages_middle() {
        assert_eq!(median(&[61.0, 120.0]), Some(90.5));
    }

    #[test]
    fn test_empty_values_are_undefined() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(mode(&[]), None);
        assert!(summarize(&[]).is_none());
    }

    // ==================== variance / std tests ====================

    #[test]
    fn test_sample_variance() {
        // (100 + 0 + 0 + 100) / 3
        let variance = sample_variance(&[10.0, 20.0, 20.0, 30.0]).unwrap();
        assert!((variance - 66.666_666).abs() < 1e-4);
    }

    #[test]
    fn test_sample_std_basic() {
        // Values: 1..=5, variance 2.5
        let std = sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_single_value_is_undefined() {
        assert_eq!(sample_std(&[42.0]), None);
    }

    #[test]
    fn test_sample_std_identical_values() {
        assert_eq!(sample_std(&[5.0, 5.0, 5.0]), Some(0.0));
    }

    // ==================== mode tests ====================

    #[test]
    fn test_mode_single_peak() {
        assert_eq!(mode(&[10, 20, 20, 30]), Some(20));
    }

    #[test]
    fn test_mode_ties_pick_smallest() {
        assert_eq!(mode(&[40, 30, 40, 30, 50]), Some(30));
        assert_eq!(mode(&[7, 3, 5]), Some(3));
    }

    // ==================== summarize tests ====================

    #[test]
    fn test_summarize_group() {
        let summary = summarize(&[61.0, 120.0]).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.min, 61.0);
        assert_eq!(summary.max, 120.0);
        assert_eq!(summary.mean, 90.5);
        assert_eq!(summary.median, 90.5);
        let std = summary.std.unwrap();
        assert!((std - 41.719_300_0).abs() < 1e-5);
    }
}
