//! Descriptive statistics over plain `f64` slices.
//!
//! All functions ignore ordering of the input and expect nulls to have been
//! removed already (see [`crate::utils::numeric_values`]).

use serde::{Deserialize, Serialize};

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N-1 denominator), `None` for fewer than 2 values.
///
/// Uses Welford's running update, so identical values give exactly zero.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let (mut running_mean, mut m2) = (0.0, 0.0);
    for (i, v) in values.iter().enumerate() {
        let delta = v - running_mean;
        running_mean += delta / (i + 1) as f64;
        m2 += delta * (v - running_mean);
    }
    Some((m2 / (values.len() as f64 - 1.0)).sqrt())
}

/// Quantile with linear interpolation between closest ranks.
///
/// `q` is clamped to `[0, 1]`. Returns `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, q))
}

/// Median (the 0.5 quantile).
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Five-number summary plus Tukey whisker ends, as drawn by a box plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxplotStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within `q1 - 1.5 * iqr`.
    pub lower_whisker: f64,
    /// Largest value within `q3 + 1.5 * iqr`.
    pub upper_whisker: f64,
    /// Values beyond the whiskers.
    pub outliers: usize,
}

impl BoxplotStats {
    /// Summarise the values, `None` if there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v >= low_fence && *v <= high_fence)
            .collect();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median: quantile_sorted(&sorted, 0.5),
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker: inside.first().copied().unwrap_or(q1),
            upper_whisker: inside.last().copied().unwrap_or(q3),
            outliers: sorted.len() - inside.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== mean / sample_std tests ====================

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_sample_std_basic() {
        // Values: 1..=5, mean 3, variance 10/4 = 2.5
        let std = sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((std - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std_single_value_is_undefined() {
        assert_eq!(sample_std(&[5.0]), None);
    }

    #[test]
    fn test_sample_std_identical_values() {
        assert_eq!(sample_std(&[5.0, 5.0, 5.0]), Some(0.0));
    }

    #[test]
    fn test_sample_std_identical_inexact_values() {
        // 7.1, 8.05 and 0.1 have no exact binary form; a sum/n mean drifts
        for v in [7.1, 8.05, 0.1] {
            assert_eq!(sample_std(&[v; 7]), Some(0.0), "value {v}");
        }
    }

    // ==================== quantile tests ====================

    #[test]
    fn test_median_even_count_interpolates() {
        assert_eq!(median(&[22.0, 38.0, 35.0, 80.0]), Some(36.5));
    }

    #[test]
    fn test_median_odd_count() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        // pos = 0.25 * 9 = 2.25 -> 3 + 0.25 * (4 - 3)
        assert_eq!(quantile(&values, 0.25), Some(3.25));
        // pos = 0.75 * 9 = 6.75 -> 7 + 0.75 * (8 - 7)
        assert_eq!(quantile(&values, 0.75), Some(7.75));
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile(&[42.0], 0.25), Some(42.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    // ==================== BoxplotStats tests ====================

    #[test]
    fn test_boxplot_stats_with_outlier() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let stats = BoxplotStats::from_values(&values).unwrap();

        assert_eq!(stats.count, 10);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.median, 5.5);
        assert_eq!(stats.upper_whisker, 9.0);
        assert_eq!(stats.outliers, 1);
    }

    #[test]
    fn test_boxplot_stats_empty() {
        assert!(BoxplotStats::from_values(&[]).is_none());
    }
}
