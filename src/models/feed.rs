use serde::Deserialize;
use std::collections::HashMap;

/// Top level of a shop-index search dump.
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    pub hits: FeedHits,
}

#[derive(Debug, Deserialize)]
pub struct FeedHits {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub hits: Vec<FeedHit>,
}

#[derive(Debug, Deserialize)]
pub struct FeedHit {
    #[serde(rename = "_source")]
    pub source: FeedItem,
}

#[derive(Debug, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub info: FeedInfo,
    #[serde(rename = "modsTotal", default)]
    pub mods: HashMap<String, ModValue>,
    #[serde(rename = "shop", default)]
    pub price: FeedPrice,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedInfo {
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "typeLine", default)]
    pub type_line: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedPrice {
    #[serde(rename = "chaosEquiv", default)]
    pub chaos_price: f64,
    #[serde(rename = "amount", default)]
    pub original_price: f64,
    #[serde(default)]
    pub currency: String,
}

/// A decoded affix value. Feeds occasionally carry strings, arrays or
/// objects where a number is expected; those land in `Other`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModValue {
    Number(f64),
    Other(serde_json::Value),
}

impl From<f64> for ModValue {
    fn from(value: f64) -> Self {
        ModValue::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_values_decode_as_tagged_variants() {
        let raw = r#"{"a": 12, "b": 0.4, "c": "12-16", "d": [1, 2]}"#;
        let mods: HashMap<String, ModValue> = serde_json::from_str(raw).unwrap();

        assert_eq!(mods["a"], ModValue::Number(12.0));
        assert_eq!(mods["b"], ModValue::Number(0.4));
        assert!(matches!(mods["c"], ModValue::Other(_)));
        assert!(matches!(mods["d"], ModValue::Other(_)));
    }

    #[test]
    fn test_feed_item_defaults() {
        let raw = r#"{"info": {"fullName": "Cobalt Jewel"}}"#;
        let item: FeedItem = serde_json::from_str(raw).unwrap();

        assert_eq!(item.info.full_name, "Cobalt Jewel");
        assert!(item.mods.is_empty());
        assert_eq!(item.price.chaos_price, 0.0);
    }

    #[test]
    fn test_feed_item_without_info() {
        let raw = r#"{"modsTotal": {"Armour": 9}, "shop": {"chaosEquiv": 3.0}}"#;
        let item: FeedItem = serde_json::from_str(raw).unwrap();

        assert_eq!(item.info.full_name, "");
        assert_eq!(item.mods["Armour"], ModValue::Number(9.0));
        assert_eq!(item.price.chaos_price, 3.0);
    }
}
