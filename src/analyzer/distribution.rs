//! Order statistics and Tukey-fence outlier classification.
//!
//! Quartiles use the split-halves (Tukey hinge) method: the sorted sample is
//! cut into a lower and upper half of `n / 2` values each, leaving the median
//! out when `n` is odd, and Q1/Q3 are the medians of those halves. A single
//! value is its own Q1, Q2 and Q3.

use serde::{Deserialize, Serialize};

use crate::models::{OutlierPass, Quartiles, SummaryStats};

/// IQR multipliers for the inner (mild) and outer (extreme) fences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FenceConfig {
    pub mild: f64,
    pub extreme: f64,
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self { mild: 1.5, extreme: 3.0 }
    }
}

pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Median of an already sorted slice.
fn median_sorted(sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    let sorted = sorted_copy(values);
    let q2 = median_sorted(&sorted)?;

    let half = sorted.len() / 2;
    if half == 0 {
        return Some(Quartiles { q1: q2, q2, q3: q2 });
    }

    let upper_start = if sorted.len() % 2 == 0 { half } else { half + 1 };
    let q1 = median_sorted(&sorted[..half])?;
    let q3 = median_sorted(&sorted[upper_start..])?;

    Some(Quartiles { q1, q2, q3 })
}

/// Splits the values lying outside the fences into (mild, extreme), both
/// in ascending order.
pub fn classify_outliers(values: &[f64], q: &Quartiles, fences: FenceConfig) -> (Vec<f64>, Vec<f64>) {
    let iqr = q.iqr();
    let inner = (q.q1 - fences.mild * iqr, q.q3 + fences.mild * iqr);
    let outer = (q.q1 - fences.extreme * iqr, q.q3 + fences.extreme * iqr);

    let mut mild = Vec::new();
    let mut extreme = Vec::new();
    for v in sorted_copy(values) {
        if v < outer.0 || v > outer.1 {
            extreme.push(v);
        } else if v < inner.0 || v > inner.1 {
            mild.push(v);
        }
    }
    (mild, extreme)
}

/// Full statistics pass over one sample set. `None` when empty.
pub fn outlier_pass(values: &[f64], fences: FenceConfig) -> Option<OutlierPass> {
    let stats = SummaryStats::from_samples(values)?;
    let quartiles = quartiles(values)?;
    let (mild, extreme) = classify_outliers(values, &quartiles, fences);

    Some(OutlierPass {
        stats,
        quartiles,
        mild,
        extreme,
    })
}

/// Drops every sample equal to any flagged outlier. Matching is by value,
/// so a duplicate of an outlier value is dropped with it.
pub fn without_outliers(values: &[f64], pass: &OutlierPass) -> Vec<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !pass.mild.contains(v) && !pass.extreme.contains(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_quartile_is_median() {
        assert_eq!(quartiles(&[3.0, 1.0, 2.0]).unwrap().q2, 2.0);
        assert_eq!(quartiles(&[4.0, 1.0, 3.0, 2.0]).unwrap().q2, 2.5);
    }

    #[test]
    fn test_quartiles_even() {
        let q = quartiles(&[8.0, 1.0, 7.0, 2.0, 6.0, 3.0, 5.0, 4.0]).unwrap();
        assert_eq!(q, Quartiles { q1: 2.5, q2: 4.5, q3: 6.5 });
        assert_eq!(q.iqr(), 4.0);
    }

    #[test]
    fn test_quartiles_odd_excludes_median() {
        let q = quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
        assert_eq!(q, Quartiles { q1: 2.0, q2: 4.0, q3: 6.0 });
    }

    #[test]
    fn test_quartiles_small_samples() {
        assert_eq!(quartiles(&[5.0]).unwrap(), Quartiles { q1: 5.0, q2: 5.0, q3: 5.0 });
        assert_eq!(quartiles(&[1.0, 3.0]).unwrap(), Quartiles { q1: 1.0, q2: 2.0, q3: 3.0 });
        assert!(quartiles(&[]).is_none());
    }

    #[test]
    fn test_mild_and_extreme_classification() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 20.0, 30.0];
        let pass = outlier_pass(&values, FenceConfig::default()).unwrap();

        // Q1 = 3, Q3 = 8, IQR = 5: inner fence 15.5, outer fence 23
        assert_eq!(pass.quartiles.q1, 3.0);
        assert_eq!(pass.quartiles.q3, 8.0);
        assert_eq!(pass.mild, vec![20.0]);
        assert_eq!(pass.extreme, vec![30.0]);
    }

    #[test]
    fn test_low_side_outliers() {
        let values = [-50.0, 10.0, 10.0, 11.0, 11.0, 12.0, 12.0, 13.0];
        let pass = outlier_pass(&values, FenceConfig::default()).unwrap();
        assert_eq!(pass.extreme, vec![-50.0]);
        assert!(pass.mild.is_empty());
    }

    #[test]
    fn test_constant_sample_has_no_outliers() {
        let pass = outlier_pass(&[2.0; 7], FenceConfig::default()).unwrap();
        assert!(!pass.has_outliers());
    }

    #[test]
    fn test_exclusion_is_by_value() {
        let mut values = vec![1.0; 9];
        values.extend([100.0, 100.0]);
        let pass = outlier_pass(&values, FenceConfig::default()).unwrap();
        assert_eq!(pass.extreme, vec![100.0, 100.0]);
        assert_eq!(without_outliers(&values, &pass), vec![1.0; 9]);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let values = [9.0, 1.0, 4.0, 120.0, 3.0, 5.0, 2.0, 8.0, 7.0];
        let first = outlier_pass(&values, FenceConfig::default());
        for _ in 0..5 {
            assert_eq!(outlier_pass(&values, FenceConfig::default()), first);
        }
    }
}
