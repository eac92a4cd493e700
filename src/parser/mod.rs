mod affix;
mod price;
mod record;

pub use affix::parse_affix_line;
pub use price::{parse_price_line, DEFAULT_PRICE_MARKER};
pub use record::RecordBuilder;
