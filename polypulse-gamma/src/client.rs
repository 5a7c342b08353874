//! Polymarket API clients
//!
//! `GammaClient` covers market/event/tag metadata from the Gamma API;
//! `ClobClient` fetches spot token prices from the CLOB API. Fetch
//! failures map to `PulseError` and propagate to the caller untouched:
//! there is no retry or backoff at this layer.

use crate::types::{ClobPriceResponse, GammaMarket, GammaTag, CLOB_API_BASE, GAMMA_API_BASE};
use polypulse_core::{PulseError, PulseResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Page size for exhaustive listing loops
const PAGE_LIMIT: usize = 100;

/// Decode a listing payload that may arrive either as a bare JSON array or
/// wrapped in an object under `key` (the provider emits both shapes)
fn decode_listing<T: DeserializeOwned>(payload: Value, key: &str) -> PulseResult<Vec<T>> {
    let inner = match payload {
        Value::Object(mut map) => map.remove(key).unwrap_or(Value::Array(Vec::new())),
        other => other,
    };

    serde_json::from_value(inner)
        .map_err(|e| PulseError::parse(format!("Failed to decode {} listing: {}", key, e)))
}

/// Gamma API client
#[derive(Clone)]
pub struct GammaClient {
    client: Client,
    base_url: String,
}

impl GammaClient {
    /// Create a client against the production Gamma API
    pub fn new() -> Self {
        Self::with_base_url(GAMMA_API_BASE)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_page(&self, path: &str, params: &[(&str, &str)]) -> PulseResult<Value> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| PulseError::network(format!("Failed to fetch {}: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PulseError::api(format!(
                "Gamma API error ({}): {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PulseError::parse(format!("Failed to parse {} response: {}", path, e)))
    }

    /// Fetch every market record matching a category, one exhaustive
    /// limit/offset loop until the provider returns a short page
    #[instrument(skip(self))]
    pub async fn fetch_markets(&self, category: &str) -> PulseResult<Vec<GammaMarket>> {
        let mut all_markets = Vec::new();
        let mut offset = 0usize;

        loop {
            debug!("Fetching Gamma markets page, offset: {}", offset);

            let limit = PAGE_LIMIT.to_string();
            let offset_str = offset.to_string();
            let payload = self
                .get_page(
                    "/markets",
                    &[
                        ("category", category),
                        ("limit", &limit),
                        ("offset", &offset_str),
                    ],
                )
                .await?;

            let page: Vec<GammaMarket> = decode_listing(payload, "markets")?;
            let page_len = page.len();
            all_markets.extend(page);

            if page_len < PAGE_LIMIT {
                break;
            }
            offset += PAGE_LIMIT;
        }

        debug!("Fetched {} Gamma markets total", all_markets.len());
        Ok(all_markets)
    }

    /// Fetch every live market record indexed under a tag.
    ///
    /// The "active, not closed" predicate is pushed to the provider so the
    /// collector does not have to re-derive liveness from record flags.
    #[instrument(skip(self))]
    pub async fn fetch_markets_by_tag(&self, tag_id: &str) -> PulseResult<Vec<GammaMarket>> {
        let mut all_markets = Vec::new();
        let mut offset = 0usize;

        loop {
            debug!("Fetching Gamma markets for tag {}, offset: {}", tag_id, offset);

            let limit = PAGE_LIMIT.to_string();
            let offset_str = offset.to_string();
            let payload = self
                .get_page(
                    "/markets",
                    &[
                        ("tag_id", tag_id),
                        ("active", "true"),
                        ("closed", "false"),
                        ("limit", &limit),
                        ("offset", &offset_str),
                    ],
                )
                .await?;

            let page: Vec<GammaMarket> = decode_listing(payload, "markets")?;
            let page_len = page.len();
            all_markets.extend(page);

            if page_len < PAGE_LIMIT {
                break;
            }
            offset += PAGE_LIMIT;
        }

        Ok(all_markets)
    }

    /// Fetch the full tag listing
    #[instrument(skip(self))]
    pub async fn fetch_tags(&self) -> PulseResult<Vec<GammaTag>> {
        let mut all_tags = Vec::new();
        let mut offset = 0usize;

        loop {
            debug!("Fetching Gamma tags page, offset: {}", offset);

            let limit = PAGE_LIMIT.to_string();
            let offset_str = offset.to_string();
            let payload = self
                .get_page("/tags", &[("limit", &limit), ("offset", &offset_str)])
                .await?;

            let page: Vec<GammaTag> = decode_listing(payload, "tags")?;
            let page_len = page.len();
            all_tags.extend(page);

            if page_len < PAGE_LIMIT {
                break;
            }
            offset += PAGE_LIMIT;
        }

        debug!("Fetched {} Gamma tags total", all_tags.len());
        Ok(all_tags)
    }

    /// Point lookup of one market record by id; absent is Ok(None)
    #[instrument(skip(self))]
    pub async fn fetch_market_by_id(&self, id: &str) -> PulseResult<Option<GammaMarket>> {
        let payload = self.get_page("/markets", &[("id", id)]).await?;
        let markets: Vec<GammaMarket> = decode_listing(payload, "markets")?;
        Ok(markets.into_iter().next())
    }
}

impl Default for GammaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GammaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GammaClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// CLOB API client for spot token prices
#[derive(Clone)]
pub struct ClobClient {
    client: Client,
    base_url: String,
}

impl ClobClient {
    /// Create a client against the production CLOB API
    pub fn new() -> Self {
        Self::with_base_url(CLOB_API_BASE)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the current price for one token
    #[instrument(skip(self))]
    pub async fn fetch_price(&self, token_id: &str, side: &str) -> PulseResult<ClobPriceResponse> {
        let url = format!("{}/price", self.base_url);

        debug!("Fetching CLOB price for token {}", token_id);

        let response = self
            .client
            .get(&url)
            .query(&[("token_id", token_id), ("side", side)])
            .send()
            .await
            .map_err(|e| PulseError::network(format!("Failed to fetch price: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PulseError::api(format!(
                "CLOB API error ({}): {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PulseError::parse(format!("Failed to parse price response: {}", e)))
    }
}

impl Default for ClobClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClobClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
