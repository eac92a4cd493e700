pub mod feed;
pub mod text;

use crate::errors::PricecheckError;
use crate::models::{ItemRecord, ParseWarning};

/// Outcome of loading a whole corpus. Rejected entries carry their index in
/// the source (block number or feed hit number).
#[derive(Debug, Default)]
pub struct CorpusLoad {
    pub records: Vec<ItemRecord>,
    pub warnings: Vec<ParseWarning>,
    pub rejected: Vec<(usize, PricecheckError)>,
}

impl CorpusLoad {
    pub fn merge(&mut self, other: CorpusLoad) {
        self.records.extend(other.records);
        self.warnings.extend(other.warnings);
        self.rejected.extend(other.rejected);
    }
}

pub use feed::{load_feed, parse_feed};
pub use text::{load_corpus, parse_corpus};
