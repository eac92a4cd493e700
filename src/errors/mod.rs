use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricecheckError {
    #[error("Malformed magnitude for {affix}: {text}")]
    MalformedMagnitude { affix: String, text: String },

    #[error("Malformed price line: {0}")]
    MalformedPrice(String),

    #[error("Undefined currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Empty item block")]
    EmptyBlock,

    #[error("Duplicate affix identifier: {0}")]
    DuplicateAffix(String),

    #[error("Invalid pattern for {affix}: {reason}")]
    InvalidPattern { affix: String, reason: String },

    #[error("Invalid rate {rate} for currency {code}")]
    InvalidCurrencyRate { code: String, rate: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for PricecheckError {
    fn from(err: toml::de::Error) -> Self {
        PricecheckError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PricecheckError>;
