use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl SummaryStats {
    /// Population statistics. `None` for an empty sample.
    pub fn from_samples(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        let variance = values
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / values.len() as f64;

        Some(Self {
            count: values.len(),
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Statistics and Tukey-fence outliers for one sample set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierPass {
    pub stats: SummaryStats,
    pub quartiles: Quartiles,
    pub mild: Vec<f64>,
    pub extreme: Vec<f64>,
}

impl OutlierPass {
    pub fn has_outliers(&self) -> bool {
        !self.mild.is_empty() || !self.extreme.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub affix: String,
    pub raw: OutlierPass,
    /// Present only when the raw pass flagged outliers.
    pub cleaned: Option<OutlierPass>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats_calculations() {
        let stats = SummaryStats::from_samples(&[10.0, 20.0, 30.0]).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);
        assert!((stats.std_dev - (200.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summary_stats_empty() {
        assert!(SummaryStats::from_samples(&[]).is_none());
    }

    #[test]
    fn test_constant_sample_has_zero_deviation() {
        let stats = SummaryStats::from_samples(&[4.0; 6]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.min, stats.max);
    }
}
