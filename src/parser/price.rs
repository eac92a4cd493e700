use crate::errors::{PricecheckError, Result};
use crate::patterns::CurrencyTable;

pub const DEFAULT_PRICE_MARKER: &str = "$ ";

/// Parses `<marker> <quantity> <currency>` into chaos. Tokens after the
/// currency code are ignored.
pub fn parse_price_line(currencies: &CurrencyTable, marker: &str, line: &str) -> Result<f64> {
    let body = line
        .strip_prefix(marker)
        .ok_or_else(|| PricecheckError::MalformedPrice(line.to_string()))?;
    let mut parts = body.split_whitespace();

    let quantity = parts
        .next()
        .and_then(|q| q.parse::<f64>().ok())
        .filter(|q| q.is_finite() && *q >= 0.0)
        .ok_or_else(|| PricecheckError::MalformedPrice(line.to_string()))?;

    let code = parts
        .next()
        .ok_or_else(|| PricecheckError::MalformedPrice(line.to_string()))?;

    let price = quantity * currencies.multiplier(code)?;
    if !price.is_finite() {
        return Err(PricecheckError::MalformedPrice(line.to_string()));
    }
    Ok(price)
}
