mod currency;
mod table;

pub use currency::{CurrencyTable, REFERENCE_CURRENCY};
pub use table::{AffixPattern, MagnitudeKind, PatternTable};
