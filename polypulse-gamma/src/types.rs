//! Raw Polymarket API response types
//!
//! These mirror the Gamma and CLOB API payloads. The provider is not
//! consistent about field names (camelCase vs snake_case), id types
//! (string vs number), or token-id encoding (JSON-encoded array vs bare
//! string), so every field is optional and shape variants are absorbed
//! here with explicit presence checks.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Base URL for the Polymarket Gamma API
pub const GAMMA_API_BASE: &str = "https://gamma-api.polymarket.com";

/// Base URL for the Polymarket CLOB API
pub const CLOB_API_BASE: &str = "https://clob.polymarket.com";

/// Deserialize an id that the provider emits as either a string or a number
fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A market/event record from the Gamma API
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    /// Provider identifier
    #[serde(default, deserialize_with = "opt_id")]
    pub id: Option<String>,

    /// Explicit event identifier (some shapes carry it, most reuse `id`)
    #[serde(default, alias = "event_id", deserialize_with = "opt_id")]
    pub event_id: Option<String>,

    /// Explicit market identifier
    #[serde(default, alias = "market_id", deserialize_with = "opt_id")]
    pub market_id: Option<String>,

    /// Market question
    #[serde(default)]
    pub question: Option<String>,

    /// Event title (the /events shape uses this instead of `question`)
    #[serde(default)]
    pub title: Option<String>,

    /// Category label
    #[serde(default)]
    pub category: Option<String>,

    /// Alternate category field on some shapes
    #[serde(default, alias = "category_name")]
    pub category_name: Option<String>,

    /// Direct single-token field
    #[serde(default, alias = "token_id")]
    pub token_id: Option<String>,

    /// CLOB token ids: a JSON-encoded array string, a real array, or a
    /// bare token string depending on the endpoint
    #[serde(default, alias = "clob_token_ids")]
    pub clob_token_ids: Option<Value>,

    /// Start instant, ISO-8601 (may carry a trailing `Z`)
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,

    /// End instant, ISO-8601
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,

    /// Free-text resolution outcome
    #[serde(default)]
    pub resolution: Option<String>,

    /// Whether the market has resolved
    #[serde(default)]
    pub resolved: Option<bool>,

    /// Whether the market is closed for trading
    #[serde(default)]
    pub closed: Option<bool>,

    /// Whether the market is active
    #[serde(default)]
    pub active: Option<bool>,
}

impl GammaMarket {
    /// Event identifier: explicit field first, else the generic `id`
    pub fn primary_event_id(&self) -> Option<String> {
        self.event_id.clone().or_else(|| self.id.clone())
    }

    /// Market identifier: explicit field first, else the generic `id`
    pub fn primary_market_id(&self) -> Option<String> {
        self.market_id.clone().or_else(|| self.id.clone())
    }

    /// Display title: `question` first, else `title`, else empty
    pub fn display_title(&self) -> String {
        self.question
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_default()
    }

    /// Category label: `category` first, else `categoryName`, else empty
    pub fn raw_category(&self) -> String {
        self.category
            .clone()
            .or_else(|| self.category_name.clone())
            .unwrap_or_default()
    }

    /// The token whose price is sampled for this record.
    ///
    /// Prefers the direct single-token field, then the first element of the
    /// token-id list in any of its encodings. None means the record cannot
    /// be priced.
    pub fn primary_token_id(&self) -> Option<String> {
        if let Some(token) = &self.token_id {
            if !token.is_empty() {
                return Some(token.clone());
            }
        }

        match &self.clob_token_ids {
            Some(Value::String(s)) if s.starts_with('[') => {
                // JSON-encoded array string, e.g. "[\"123\", \"456\"]"
                serde_json::from_str::<Vec<String>>(s)
                    .ok()
                    .and_then(|ids| ids.into_iter().next())
            }
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Array(items)) => items.iter().find_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }),
            _ => None,
        }
    }
}

/// A tag from the Gamma API
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaTag {
    /// Tag identifier (string or number upstream)
    #[serde(default, deserialize_with = "opt_id")]
    pub id: Option<String>,

    /// Human-readable label (e.g. "Crypto")
    #[serde(default)]
    pub label: Option<String>,

    /// URL slug (e.g. "crypto")
    #[serde(default)]
    pub slug: Option<String>,
}

/// Response from the CLOB `GET /price` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ClobPriceResponse {
    /// Price as a decimal string, e.g. "0.57"
    #[serde(default)]
    pub price: Option<String>,
}

impl ClobPriceResponse {
    /// Parse the price field; unparsable or absent input yields None
    pub fn parse_price(&self) -> Option<Decimal> {
        self.price.as_deref().and_then(|p| Decimal::from_str(p).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_prefers_direct_field() {
        let market: GammaMarket = serde_json::from_str(
            r#"{"id": "1", "tokenId": "direct", "clobTokenIds": "[\"listed\"]"}"#,
        )
        .unwrap();
        assert_eq!(market.primary_token_id(), Some("direct".to_string()));
    }

    #[test]
    fn test_token_id_from_encoded_list() {
        let market: GammaMarket =
            serde_json::from_str(r#"{"id": "1", "clobTokenIds": "[\"123\", \"456\"]"}"#).unwrap();
        assert_eq!(market.primary_token_id(), Some("123".to_string()));
    }

    #[test]
    fn test_token_id_from_real_array() {
        let market: GammaMarket =
            serde_json::from_str(r#"{"id": "1", "clob_token_ids": ["789", "012"]}"#).unwrap();
        assert_eq!(market.primary_token_id(), Some("789".to_string()));
    }

    #[test]
    fn test_token_id_bare_string() {
        let market: GammaMarket =
            serde_json::from_str(r#"{"id": "1", "clobTokenIds": "solo"}"#).unwrap();
        assert_eq!(market.primary_token_id(), Some("solo".to_string()));
    }

    #[test]
    fn test_token_id_absent() {
        let market: GammaMarket = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert_eq!(market.primary_token_id(), None);
    }

    #[test]
    fn test_numeric_ids_accepted() {
        let market: GammaMarket =
            serde_json::from_str(r#"{"id": 42, "question": "Up or down?"}"#).unwrap();
        assert_eq!(market.primary_event_id(), Some("42".to_string()));

        let tag: GammaTag = serde_json::from_str(r#"{"id": 21, "slug": "crypto"}"#).unwrap();
        assert_eq!(tag.id, Some("21".to_string()));
    }

    #[test]
    fn test_clob_price_parsing() {
        let response: ClobPriceResponse = serde_json::from_str(r#"{"price": "0.57"}"#).unwrap();
        assert_eq!(response.parse_price(), Some(Decimal::new(57, 2)));

        let response: ClobPriceResponse = serde_json::from_str(r#"{"price": "n/a"}"#).unwrap();
        assert_eq!(response.parse_price(), None);

        let response: ClobPriceResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(response.parse_price(), None);
    }
}
