//! Shared test doubles for the pipeline

use crate::gateway::MarketGateway;
use async_trait::async_trait;
use parking_lot::Mutex;
use polypulse_core::{PulseError, PulseResult};
use polypulse_gamma::{GammaMarket, GammaTag};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned gateway: hands out configured payloads and counts calls
#[derive(Default)]
pub struct MockGateway {
    markets: Mutex<Vec<GammaMarket>>,
    tag_markets: Mutex<Vec<GammaMarket>>,
    tags: Mutex<Vec<GammaTag>>,
    fail_markets: Mutex<bool>,
    market_fetches: AtomicUsize,
    tag_market_fetches: AtomicUsize,
    tag_fetches: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(self, tags: Vec<(&str, &str, &str)>) -> Self {
        *self.tags.lock() = tags
            .into_iter()
            .map(|(id, label, slug)| GammaTag {
                id: Some(id.to_string()),
                label: Some(label.to_string()),
                slug: Some(slug.to_string()),
            })
            .collect();
        self
    }

    pub fn with_markets(self, markets: Vec<GammaMarket>) -> Self {
        *self.markets.lock() = markets;
        self
    }

    pub fn with_tag_markets(self, markets: Vec<GammaMarket>) -> Self {
        *self.tag_markets.lock() = markets;
        self
    }

    /// Swap the category-fetch payload mid-test
    pub fn set_markets(&self, markets: Vec<GammaMarket>) {
        *self.markets.lock() = markets;
    }

    /// Make the category fetch fail with a network error
    pub fn fail_markets(&self) {
        *self.fail_markets.lock() = true;
    }

    pub fn market_fetches(&self) -> usize {
        self.market_fetches.load(Ordering::SeqCst)
    }

    pub fn tag_market_fetches(&self) -> usize {
        self.tag_market_fetches.load(Ordering::SeqCst)
    }

    pub fn tag_fetches(&self) -> usize {
        self.tag_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketGateway for MockGateway {
    async fn fetch_markets(&self, _category: &str) -> PulseResult<Vec<GammaMarket>> {
        self.market_fetches.fetch_add(1, Ordering::SeqCst);
        if *self.fail_markets.lock() {
            return Err(PulseError::network("mock fetch failure"));
        }
        Ok(self.markets.lock().clone())
    }

    async fn fetch_markets_by_tag(&self, _tag_id: &str) -> PulseResult<Vec<GammaMarket>> {
        self.tag_market_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.tag_markets.lock().clone())
    }

    async fn fetch_tags(&self) -> PulseResult<Vec<GammaTag>> {
        self.tag_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.tags.lock().clone())
    }
}

/// Build a raw market record from inline JSON
pub fn raw_market(json: &str) -> GammaMarket {
    serde_json::from_str(json).unwrap()
}
