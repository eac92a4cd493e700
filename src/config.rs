use serde::Deserialize;
use std::path::Path;

use crate::analyzer::FenceConfig;
use crate::errors::{PricecheckError, Result};
use crate::parser::DEFAULT_PRICE_MARKER;

pub const CONFIG_ENV_VAR: &str = "PRICECHECK_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_price_marker")]
    pub price_marker: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_mild_fence")]
    pub mild_fence: f64,
    #[serde(default = "default_extreme_fence")]
    pub extreme_fence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { price_marker: default_price_marker() }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mild_fence: default_mild_fence(),
            extreme_fence: default_extreme_fence(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Config {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await.map_err(|e| {
            PricecheckError::Config(format!("failed to read {:?}: {}", path.as_ref(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from the file named by `PRICECHECK_CONFIG`, or falls back to
    /// the built-in defaults when it is unset.
    pub async fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load(path).await,
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn fences(&self) -> FenceConfig {
        FenceConfig {
            mild: self.analysis.mild_fence,
            extreme: self.analysis.extreme_fence,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.parser.price_marker.is_empty() {
            return Err(PricecheckError::Config("parser.price_marker must not be empty".into()));
        }

        let AnalysisConfig { mild_fence, extreme_fence } = self.analysis;
        if !(mild_fence.is_finite() && mild_fence > 0.0) {
            return Err(PricecheckError::Config(format!(
                "analysis.mild_fence must be positive, got {}",
                mild_fence
            )));
        }
        if !(extreme_fence.is_finite() && extreme_fence > mild_fence) {
            return Err(PricecheckError::Config(format!(
                "analysis.extreme_fence must exceed mild_fence ({}), got {}",
                mild_fence, extreme_fence
            )));
        }
        Ok(())
    }
}

fn default_price_marker() -> String {
    DEFAULT_PRICE_MARKER.to_string()
}

fn default_mild_fence() -> f64 {
    1.5
}

fn default_extreme_fence() -> f64 {
    3.0
}

fn default_log_level() -> String {
    "info".to_string()
}
