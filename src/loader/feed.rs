use std::path::Path;
use tracing::{info, warn};

use super::CorpusLoad;
use crate::errors::Result;
use crate::models::FeedResponse;
use crate::parser::RecordBuilder;

/// Decodes a shop-index search dump (`hits.hits[]._source`) into records.
pub fn parse_feed(builder: &RecordBuilder<'_>, json: &str) -> Result<CorpusLoad> {
    let response: FeedResponse = serde_json::from_str(json)?;
    let mut load = CorpusLoad::default();

    for (index, hit) in response.hits.hits.into_iter().enumerate() {
        let item = hit.source;
        match builder.from_decoded(&item.info.full_name, item.mods, item.price.chaos_price) {
            Ok(parsed) => {
                load.warnings.extend(parsed.warnings);
                load.records.push(parsed.record);
            }
            Err(e) => {
                warn!(hit = index, error = %e, "rejected feed item");
                load.rejected.push((index, e));
            }
        }
    }

    Ok(load)
}

pub async fn load_feed(builder: &RecordBuilder<'_>, path: impl AsRef<Path>) -> Result<CorpusLoad> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let load = parse_feed(builder, &content)?;

    info!(
        path = %path.display(),
        records = load.records.len(),
        rejected = load.rejected.len(),
        warnings = load.warnings.len(),
        "loaded JSON feed"
    );
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PricecheckError;
    use crate::models::ParseWarning;
    use std::io::Write;

    const FEED: &str = r#"{
        "hits": {
            "total": 3,
            "hits": [
                {"_source": {
                    "info": {"fullName": "Rune Spark Viridian Jewel", "name": "Rune Spark", "typeLine": "Viridian Jewel"},
                    "modsTotal": {"maximum Life": 7, "Lightning Resistance": 14},
                    "shop": {"chaosEquiv": 12.0, "amount": 12, "currency": "chaos"}
                }},
                {"_source": {
                    "info": {"fullName": "Dire Hope Cobalt Jewel"},
                    "modsTotal": {"Cast Speed": 4, "Some Future Mod": 10, "Spell Damage": "14"},
                    "shop": {"chaosEquiv": 50.0, "amount": 1, "currency": "exalt"}
                }},
                {"_source": {
                    "info": {"fullName": "Broken Listing"},
                    "modsTotal": {},
                    "shop": {"chaosEquiv": -5.0}
                }}
            ]
        }
    }"#;

    #[test]
    fn test_parse_feed() {
        let load = parse_feed(&RecordBuilder::standard(), FEED).unwrap();

        assert_eq!(load.records.len(), 2);
        let first = &load.records[0];
        assert_eq!(first.name, "Rune Spark Viridian Jewel");
        assert_eq!(first.price, 12.0);
        assert_eq!(first.magnitude("Lightning Resistance"), Some(14.0));

        // unknown key and non-numeric value are dropped, the listing is kept
        let second = &load.records[1];
        assert_eq!(second.magnitude("Cast Speed"), Some(4.0));
        assert!(!second.has_affix("Spell Damage"));
        assert_eq!(load.warnings.len(), 2);
        assert!(load.warnings.contains(&ParseWarning::UnknownAffixKey {
            key: "Some Future Mod".to_string()
        }));

        assert_eq!(load.rejected.len(), 1);
        assert!(matches!(load.rejected[0].1, PricecheckError::MalformedPrice(_)));
    }

    #[test]
    fn test_hit_without_info_keeps_the_dump() {
        let json = r#"{"hits": {"hits": [
            {"_source": {"modsTotal": {"Armour": 9}, "shop": {"chaosEquiv": 3.0}}},
            {"_source": {"info": {"fullName": "Crimson Jewel"}, "shop": {"chaosEquiv": 1.0}}}
        ]}}"#;
        let load = parse_feed(&RecordBuilder::standard(), json).unwrap();

        assert_eq!(load.records.len(), 2);
        assert_eq!(load.records[0].name, "");
        assert_eq!(load.records[0].magnitude("Armour"), Some(9.0));
        assert_eq!(load.records[1].name, "Crimson Jewel");
    }

    #[test]
    fn test_malformed_json() {
        let result = parse_feed(&RecordBuilder::standard(), "{\"hits\": [");
        assert!(matches!(result, Err(PricecheckError::Json(_))));
    }

    #[tokio::test]
    async fn test_load_feed_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEED.as_bytes()).unwrap();

        let load = load_feed(&RecordBuilder::standard(), file.path()).await.unwrap();
        assert_eq!(load.records.len(), 2);
    }
}
