//! Event collection
//!
//! Orchestrates one collection run: resolve the category filter, fetch
//! candidate records from the gateway, normalize them, apply the optional
//! point and recency filters, and upsert the survivors into the event
//! store. A gateway failure aborts the whole run; partial success within
//! one run is not supported.

use crate::gateway::MarketGateway;
use crate::normalizer::{normalize, normalize_label};
use crate::repository::Repositories;
use crate::resolver::TagResolver;
use chrono::{DateTime, Duration, Utc};
use polypulse_core::{Event, PulseResult};
use polypulse_gamma::GammaMarket;
use std::sync::Arc;
use tracing::{debug, trace};

/// Collector configuration
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// The broad parent category. When the effective filter equals it, the
    /// tag-indexed fetch path is tried first.
    pub broad_category: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            broad_category: "crypto".to_string(),
        }
    }
}

/// Orchestrates gateway fetches, normalization, filtering, and upserts
pub struct EventCollector {
    gateway: Arc<dyn MarketGateway>,
    repositories: Arc<Repositories>,
    resolver: Arc<TagResolver>,
    config: CollectorConfig,
}

impl EventCollector {
    pub fn new(
        gateway: Arc<dyn MarketGateway>,
        repositories: Arc<Repositories>,
        resolver: Arc<TagResolver>,
        config: CollectorConfig,
    ) -> Self {
        Self {
            gateway,
            repositories,
            resolver,
            config,
        }
    }

    /// Run one collection pass and return the surviving batch in
    /// gateway-returned order.
    ///
    /// `category` defaults to the broad category. `event_id` keeps only
    /// the matching event (applied after normalization; the gateway does
    /// not support the filter on every fetch path). `days` keeps only
    /// events with a start or end at/after now minus that many days.
    pub async fn collect(
        &self,
        category: Option<&str>,
        days: Option<i64>,
        event_id: Option<&str>,
    ) -> PulseResult<Vec<Event>> {
        let filter = category.unwrap_or(&self.config.broad_category);
        let raw_records = self.fetch_candidates(filter).await?;
        let fetched = raw_records.len();

        let mut events: Vec<Event> = raw_records
            .iter()
            .filter_map(|raw| {
                let event = normalize(raw, filter, &self.config.broad_category);
                if event.is_none() {
                    // Malformed or off-category upstream records are
                    // expected and non-fatal.
                    trace!("Dropping record {:?} during normalization", raw.id);
                }
                event
            })
            .collect();

        if let Some(wanted) = event_id {
            events.retain(|event| event.event_id == wanted);
        }

        if let Some(days) = days {
            let cutoff = Utc::now() - Duration::days(days);
            events.retain(|event| is_recent(event, cutoff));
        }

        for event in &events {
            self.repositories.events.upsert(event.clone());
        }

        debug!(
            "Collected {} of {} fetched records for category {:?}",
            events.len(),
            fetched,
            filter
        );
        Ok(events)
    }

    /// Fetch candidate raw records for the effective filter.
    ///
    /// The broad category goes through the tag index first because the
    /// provider maintains tag and category indexes independently and
    /// either may be stale; an unresolved label or an empty tag result
    /// falls back to the plain category fetch.
    async fn fetch_candidates(&self, filter: &str) -> PulseResult<Vec<GammaMarket>> {
        if normalize_label(filter) == normalize_label(&self.config.broad_category) {
            match self.resolver.resolve(filter).await? {
                Some(tag_id) => {
                    let records = self.gateway.fetch_markets_by_tag(&tag_id).await?;
                    if !records.is_empty() {
                        return Ok(records);
                    }
                    debug!(
                        "Tag {} resolved but returned no records, falling back to category fetch",
                        tag_id
                    );
                }
                None => {
                    debug!(
                        "No tag found for label {:?}, falling back to category fetch",
                        filter
                    );
                }
            }
        }

        self.gateway.fetch_markets(filter).await
    }
}

fn is_recent(event: &Event, cutoff: DateTime<Utc>) -> bool {
    // Either field at/after the cutoff qualifies; an event with no
    // parsable timestamps cannot be proven recent and is excluded.
    event.start_time.is_some_and(|t| t >= cutoff) || event.end_time.is_some_and(|t| t >= cutoff)
}
