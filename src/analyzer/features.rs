use serde::Serialize;

use crate::models::ItemRecord;
use crate::patterns::PatternTable;

/// Inputs and normalized targets for an external price regressor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSet {
    pub axes: Vec<String>,
    pub inputs: Vec<Vec<f64>>,
    /// Prices divided by `max_price`.
    pub targets: Vec<f64>,
    pub max_price: f64,
}

impl TrainingSet {
    /// Maps a regressor output in target space back to chaos.
    pub fn rescale(&self, output: f64) -> f64 {
        output * self.max_price
    }
}

pub struct FeatureEncoder<'a> {
    table: &'a PatternTable,
}

impl<'a> FeatureEncoder<'a> {
    pub fn new(table: &'a PatternTable) -> Self {
        Self { table }
    }

    pub fn to_vector(&self, record: &ItemRecord) -> Vec<f64> {
        self.table
            .patterns_in_order()
            .map(|id| record.magnitude(id).unwrap_or(0.0))
            .collect()
    }

    pub fn training_set(&self, records: &[ItemRecord]) -> TrainingSet {
        let max_price = records.iter().map(|r| r.price).fold(0.0, f64::max);

        let targets = records
            .iter()
            .map(|r| if max_price > 0.0 { r.price / max_price } else { 0.0 })
            .collect();

        TrainingSet {
            axes: self.table.patterns_in_order().map(str::to_string).collect(),
            inputs: records.iter().map(|r| self.to_vector(r)).collect(),
            targets,
            max_price,
        }
    }
}
