use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::errors::{PricecheckError, Result};

pub const REFERENCE_CURRENCY: &str = "chaos";

const STANDARD_RATES: &[(&str, f64)] = &[
    ("chaos", 1.0),
    ("exalt", 50.0),
    ("fuse", 0.5),
    ("regret", 1.5),
    ("jew", 0.125),
    ("alt", 0.0667),
    ("alch", 0.333),
];

static STANDARD_CURRENCIES: Lazy<CurrencyTable> = Lazy::new(|| {
    let rates = STANDARD_RATES.iter().map(|(code, rate)| (code.to_string(), *rate));
    CurrencyTable::new(rates).unwrap_or_else(|e| panic!("standard currency table is invalid: {e}"))
});

/// Conversion rates into chaos orbs.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    rates: HashMap<String, f64>,
}

impl CurrencyTable {
    pub fn new<I>(rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut table = HashMap::new();
        for (code, rate) in rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(PricecheckError::InvalidCurrencyRate { code, rate });
            }
            table.insert(code, rate);
        }

        if let Some(&rate) = table.get(REFERENCE_CURRENCY) {
            if rate != 1.0 {
                return Err(PricecheckError::InvalidCurrencyRate {
                    code: REFERENCE_CURRENCY.to_string(),
                    rate,
                });
            }
        }

        Ok(Self { rates: table })
    }

    pub fn standard() -> &'static CurrencyTable {
        &STANDARD_CURRENCIES
    }

    pub fn multiplier(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| PricecheckError::UnknownCurrency(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rates() {
        let table = CurrencyTable::standard();
        assert_eq!(table.multiplier("chaos").unwrap(), 1.0);
        assert_eq!(table.multiplier("exalt").unwrap(), 50.0);
        assert_eq!(table.multiplier("jew").unwrap(), 0.125);
        assert_eq!(table.multiplier("alch").unwrap(), 0.333);
    }

    #[test]
    fn test_unknown_currency() {
        let err = CurrencyTable::standard().multiplier("mirror").unwrap_err();
        assert!(matches!(err, PricecheckError::UnknownCurrency(code) if code == "mirror"));
    }

    #[test]
    fn test_rates_must_be_positive() {
        let zero = CurrencyTable::new(vec![("scrap".to_string(), 0.0)]);
        assert!(matches!(zero, Err(PricecheckError::InvalidCurrencyRate { .. })));

        let nan = CurrencyTable::new(vec![("scrap".to_string(), f64::NAN)]);
        assert!(matches!(nan, Err(PricecheckError::InvalidCurrencyRate { .. })));
    }

    #[test]
    fn test_reference_currency_is_unit() {
        let result = CurrencyTable::new(vec![("chaos".to_string(), 2.0)]);
        assert!(matches!(result, Err(PricecheckError::InvalidCurrencyRate { code, .. }) if code == "chaos"));
    }
}
