//! Gateway seam between the pipeline and the provider clients
//!
//! The collector and resolver depend on this trait rather than on the
//! concrete Gamma client so the pipeline can be exercised against canned
//! payloads. It is the only boundary the core awaits on.

use async_trait::async_trait;
use polypulse_core::PulseResult;
use polypulse_gamma::{GammaClient, GammaMarket, GammaTag};

/// Raw market/event/tag access as the collector consumes it
#[async_trait]
pub trait MarketGateway: Send + Sync {
    /// Fetch raw market records for a category
    async fn fetch_markets(&self, category: &str) -> PulseResult<Vec<GammaMarket>>;

    /// Fetch live raw market records indexed under a tag
    async fn fetch_markets_by_tag(&self, tag_id: &str) -> PulseResult<Vec<GammaMarket>>;

    /// Fetch the full tag listing
    async fn fetch_tags(&self) -> PulseResult<Vec<GammaTag>>;
}

#[async_trait]
impl MarketGateway for GammaClient {
    async fn fetch_markets(&self, category: &str) -> PulseResult<Vec<GammaMarket>> {
        GammaClient::fetch_markets(self, category).await
    }

    async fn fetch_markets_by_tag(&self, tag_id: &str) -> PulseResult<Vec<GammaMarket>> {
        GammaClient::fetch_markets_by_tag(self, tag_id).await
    }

    async fn fetch_tags(&self) -> PulseResult<Vec<GammaTag>> {
        GammaClient::fetch_tags(self).await
    }
}
