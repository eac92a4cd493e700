use std::path::Path;
use tracing::{info, warn};

use super::CorpusLoad;
use crate::errors::Result;
use crate::models::ParseMode;
use crate::parser::RecordBuilder;

/// Splits a multi-item file into blocks on blank lines.
pub fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

/// Parses every block leniently. A block that fails is rejected on its own;
/// the rest of the corpus still loads.
pub fn parse_corpus(builder: &RecordBuilder<'_>, text: &str) -> CorpusLoad {
    let mut load = CorpusLoad::default();

    for (index, block) in split_blocks(text).iter().enumerate() {
        match builder.parse_item(block, ParseMode::Lenient) {
            Ok(parsed) => {
                load.warnings.extend(parsed.warnings);
                load.records.push(parsed.record);
            }
            Err(e) => {
                warn!(block = index, error = %e, "rejected item block");
                load.rejected.push((index, e));
            }
        }
    }

    load
}

pub async fn load_corpus(builder: &RecordBuilder<'_>, path: impl AsRef<Path>) -> Result<CorpusLoad> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let load = parse_corpus(builder, &content);

    info!(
        path = %path.display(),
        records = load.records.len(),
        rejected = load.rejected.len(),
        warnings = load.warnings.len(),
        "loaded text corpus"
    );
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PricecheckError;
    use std::io::Write;

    const CORPUS: &str = "Viridian Jewel\n\
                          15% increased Fire Damage\n\
                          $ 2 chaos\n\
                          \n\
                          Crimson Jewel\n\
                          Corrupted\n\
                          +20 to Strength\n\
                          $ 1 exalt\n\
                          \n\
                          \n\
                          Cobalt Jewel\n\
                          $ 3 mirror\n";

    #[test]
    fn test_split_blocks() {
        let blocks = split_blocks("a\nb\n\nc\r\n\r\n\r\n\nd\n");
        assert_eq!(blocks, vec!["a\nb", "c", "d"]);
        assert!(split_blocks("\n\n").is_empty());
    }

    #[test]
    fn test_parse_corpus_is_lenient_per_block() {
        let load = parse_corpus(&RecordBuilder::standard(), CORPUS);

        assert_eq!(load.records.len(), 2);
        assert_eq!(load.records[0].magnitude("Fire Damage"), Some(15.0));
        assert_eq!(load.records[1].price, 50.0);
        assert_eq!(load.records[1].magnitude("Strength"), Some(20.0));

        assert_eq!(load.warnings.len(), 1);
        assert_eq!(load.rejected.len(), 1);
        assert_eq!(load.rejected[0].0, 2);
        assert!(matches!(load.rejected[0].1, PricecheckError::UnknownCurrency(_)));
    }

    #[tokio::test]
    async fn test_load_corpus_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CORPUS.as_bytes()).unwrap();

        let load = load_corpus(&RecordBuilder::standard(), file.path()).await.unwrap();
        assert_eq!(load.records.len(), 2);
    }

    #[tokio::test]
    async fn test_load_corpus_missing_file() {
        let result = load_corpus(&RecordBuilder::standard(), "/nonexistent/jewels.txt").await;
        assert!(matches!(result, Err(PricecheckError::Io(_))));
    }
}
