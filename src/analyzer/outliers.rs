use std::collections::BTreeMap;
use tracing::debug;

use super::distribution::{outlier_pass, without_outliers, FenceConfig};
use crate::models::{ItemRecord, OutlierReport};

/// Groups listing prices by affix and flags price outliers per group.
pub struct OutlierAnalyzer {
    fences: FenceConfig,
}

impl OutlierAnalyzer {
    pub fn new(fences: FenceConfig) -> Self {
        Self { fences }
    }

    /// Every record's price, filed under each affix the record carries.
    pub fn price_groups(&self, records: &[ItemRecord]) -> BTreeMap<String, Vec<f64>> {
        let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for record in records {
            for affix in record.affixes.keys() {
                groups.entry(affix.clone()).or_default().push(record.price);
            }
        }

        groups
    }

    pub fn analyze(&self, records: &[ItemRecord]) -> BTreeMap<String, OutlierReport> {
        self.price_groups(records)
            .into_iter()
            .filter_map(|(affix, prices)| {
                let report = self.analyze_group(&affix, &prices)?;
                Some((affix, report))
            })
            .collect()
    }

    pub fn analyze_group(&self, affix: &str, prices: &[f64]) -> Option<OutlierReport> {
        let raw = outlier_pass(prices, self.fences)?;

        let cleaned = if raw.has_outliers() {
            let kept = without_outliers(prices, &raw);
            debug!(
                affix,
                removed = prices.len() - kept.len(),
                remaining = kept.len(),
                "removed price outliers"
            );
            outlier_pass(&kept, self.fences)
        } else {
            None
        };

        Some(OutlierReport {
            affix: affix.to_string(),
            raw,
            cleaned,
        })
    }
}

impl Default for OutlierAnalyzer {
    fn default() -> Self {
        Self::new(FenceConfig::default())
    }
}
