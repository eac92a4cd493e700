pub mod distribution;
mod features;
mod outliers;

pub use distribution::FenceConfig;
pub use features::{FeatureEncoder, TrainingSet};
pub use outliers::OutlierAnalyzer;
