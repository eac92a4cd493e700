use crate::errors::{PricecheckError, Result};
use crate::patterns::{AffixPattern, MagnitudeKind, PatternTable};

/// Applies every pattern to `line` in declared order and returns all matches.
pub fn parse_affix_line(table: &PatternTable, line: &str) -> Result<Vec<(String, f64)>> {
    let mut matches = Vec::new();

    for pattern in table.iter() {
        if let Some(text) = pattern.capture(line) {
            let magnitude = read_magnitude(pattern, text)?;
            matches.push((pattern.identifier.clone(), magnitude));
        }
    }

    Ok(matches)
}

fn read_magnitude(pattern: &AffixPattern, text: &str) -> Result<f64> {
    let malformed = || PricecheckError::MalformedMagnitude {
        affix: pattern.identifier.clone(),
        text: text.to_string(),
    };

    match pattern.kind {
        MagnitudeKind::Integer => text.parse::<i64>().map(|v| v as f64).map_err(|_| malformed()),
        MagnitudeKind::Decimal => text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(malformed),
    }
}
