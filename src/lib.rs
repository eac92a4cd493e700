//! Parses free-text Path of Exile item listings into structured records and
//! finds price outliers per affix across a corpus of listings.

pub mod analyzer;
pub mod config;
pub mod errors;
pub mod loader;
pub mod models;
pub mod parser;
pub mod patterns;

pub use analyzer::{FeatureEncoder, FenceConfig, OutlierAnalyzer, TrainingSet};
pub use config::Config;
pub use errors::{PricecheckError, Result};
pub use models::{ItemRecord, OutlierReport, ParseMode, ParsedItem};
pub use parser::RecordBuilder;
pub use patterns::{CurrencyTable, PatternTable};
