use tracing::{debug, warn};

use super::affix::parse_affix_line;
use super::price::{parse_price_line, DEFAULT_PRICE_MARKER};
use crate::errors::{PricecheckError, Result};
use crate::models::{ItemRecord, ModValue, ParseMode, ParseWarning, ParsedItem};
use crate::patterns::{CurrencyTable, PatternTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    ExpectName,
    ExpectBody,
    Done,
}

/// Turns item text blocks, or already decoded listings, into records.
#[derive(Debug, Clone)]
pub struct RecordBuilder<'a> {
    patterns: &'a PatternTable,
    currencies: &'a CurrencyTable,
    price_marker: String,
}

impl RecordBuilder<'static> {
    pub fn standard() -> Self {
        Self::new(PatternTable::standard(), CurrencyTable::standard())
    }
}

impl<'a> RecordBuilder<'a> {
    pub fn new(patterns: &'a PatternTable, currencies: &'a CurrencyTable) -> Self {
        Self {
            patterns,
            currencies,
            price_marker: DEFAULT_PRICE_MARKER.to_string(),
        }
    }

    pub fn with_price_marker(mut self, marker: &str) -> Self {
        self.price_marker = marker.to_string();
        self
    }

    pub fn patterns(&self) -> &'a PatternTable {
        self.patterns
    }

    /// Parses a single user-supplied item. Any unrecognized line is an error.
    pub fn parse_strict(&self, text: &str) -> Result<ItemRecord> {
        let text = text.trim_end_matches(['\n', '\r']);
        self.parse_item(text, ParseMode::Strict).map(ParsedItem::into_record)
    }

    pub fn parse_item(&self, text: &str, mode: ParseMode) -> Result<ParsedItem> {
        if text.trim().is_empty() {
            return Err(PricecheckError::EmptyBlock);
        }

        let mut record = ItemRecord::new(String::new());
        let mut warnings = Vec::new();
        let mut state = BlockState::ExpectName;

        let mut lines = text
            .split('\n')
            .map(|raw| raw.strip_suffix('\r').unwrap_or(raw));

        while state != BlockState::Done {
            state = match state {
                BlockState::ExpectName => {
                    let name = lines.next().unwrap_or_default();
                    if name.trim().is_empty() {
                        return Err(PricecheckError::EmptyBlock);
                    }
                    record.name = name.to_string();
                    BlockState::ExpectBody
                }
                BlockState::ExpectBody => match lines.next() {
                    Some(line) => {
                        let skip = mode == ParseMode::Lenient && line.trim().is_empty();
                        if !skip {
                            if let Some(warning) = self.apply_body_line(&mut record, line, mode)? {
                                warn!(item = %record.name, "{}", warning);
                                warnings.push(warning);
                            }
                        }
                        BlockState::ExpectBody
                    }
                    None => BlockState::Done,
                },
                BlockState::Done => BlockState::Done,
            };
        }

        debug!(
            item = %record.name,
            affixes = record.affixes.len(),
            price = record.price,
            "parsed item"
        );

        Ok(ParsedItem { record, warnings })
    }

    fn apply_body_line(
        &self,
        record: &mut ItemRecord,
        line: &str,
        mode: ParseMode,
    ) -> Result<Option<ParseWarning>> {
        if line.starts_with(&self.price_marker) {
            record.price = parse_price_line(self.currencies, &self.price_marker, line)?;
            return Ok(None);
        }

        let matches = parse_affix_line(self.patterns, line)?;
        if matches.is_empty() {
            return match mode {
                ParseMode::Strict => Err(PricecheckError::UnknownProperty(line.to_string())),
                ParseMode::Lenient => Ok(Some(ParseWarning::UnknownProperty {
                    line: line.to_string(),
                })),
            };
        }

        record.affixes.extend(matches);
        Ok(None)
    }

    /// Builds a record from a listing that was decoded elsewhere. Unknown
    /// keys and non-numeric values are dropped with a warning; the rest of
    /// the listing is kept.
    pub fn from_decoded<I>(&self, name: &str, mods: I, price: f64) -> Result<ParsedItem>
    where
        I: IntoIterator<Item = (String, ModValue)>,
    {
        if !price.is_finite() || price < 0.0 {
            return Err(PricecheckError::MalformedPrice(format!("{} for {}", price, name)));
        }

        let mut record = ItemRecord::new(name.to_string()).with_price(price);
        let mut warnings = Vec::new();

        for (key, value) in mods {
            if !self.patterns.contains(&key) {
                warnings.push(ParseWarning::UnknownAffixKey { key });
                continue;
            }
            match value {
                ModValue::Number(magnitude) if magnitude.is_finite() => {
                    record.affixes.insert(key, magnitude);
                }
                ModValue::Number(magnitude) => warnings.push(ParseWarning::UnsupportedValue {
                    key,
                    value: magnitude.to_string(),
                }),
                ModValue::Other(value) => warnings.push(ParseWarning::UnsupportedValue {
                    key,
                    value: value.to_string(),
                }),
            }
        }

        for warning in &warnings {
            warn!(item = %record.name, "{}", warning);
        }

        Ok(ParsedItem { record, warnings })
    }
}
