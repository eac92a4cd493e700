use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parsed trade listing. Prices are in chaos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub price: f64,
    pub affixes: HashMap<String, f64>,
}

impl ItemRecord {
    pub fn new(name: String) -> Self {
        Self {
            name,
            price: 0.0,
            affixes: HashMap::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_affix(mut self, identifier: &str, magnitude: f64) -> Self {
        self.affixes.insert(identifier.to_string(), magnitude);
        self
    }

    pub fn magnitude(&self, identifier: &str) -> Option<f64> {
        self.affixes.get(identifier).copied()
    }

    pub fn has_affix(&self, identifier: &str) -> bool {
        self.affixes.contains_key(identifier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Any unrecognized line fails the item.
    Strict,
    /// Unrecognized lines are skipped and reported as warnings.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParseWarning {
    UnknownProperty { line: String },
    UnknownAffixKey { key: String },
    UnsupportedValue { key: String, value: String },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnknownProperty { line } => write!(f, "unknown property: {}", line),
            ParseWarning::UnknownAffixKey { key } => write!(f, "unknown affix key: {}", key),
            ParseWarning::UnsupportedValue { key, value } => {
                write!(f, "unsupported value for {}: {}", key, value)
            }
        }
    }
}

/// A record together with whatever was skipped while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedItem {
    pub record: ItemRecord,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedItem {
    pub fn into_record(self) -> ItemRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation_and_modification() {
        let record = ItemRecord::new("Viridian Jewel".to_string())
            .with_price(12.5)
            .with_affix("maximum Life", 7.0)
            .with_affix("Fire Resistance", 0.0);

        assert_eq!(record.price, 12.5);
        assert_eq!(record.magnitude("maximum Life"), Some(7.0));
        // present with zero is not the same as absent
        assert!(record.has_affix("Fire Resistance"));
        assert!(!record.has_affix("Cold Resistance"));
        assert_eq!(record.magnitude("Cold Resistance"), None);
    }

    #[test]
    fn test_warning_display() {
        let warning = ParseWarning::UnknownProperty { line: "Corrupted".to_string() };
        assert_eq!(warning.to_string(), "unknown property: Corrupted");
    }
}
