//! Analytics aggregation
//!
//! Derives min/max/last price statistics for one event over its active
//! lifetime window. Every update is a full recomputation over the stored
//! series; there is no incremental merge, so repeated updates over a fixed
//! series are idempotent.

use crate::repository::Repositories;
use chrono::Utc;
use polypulse_core::{EventAnalytics, EventStatus};
use std::sync::Arc;
use tracing::debug;

/// Computes and persists per-event price analytics
pub struct AnalyticsAggregator {
    repositories: Arc<Repositories>,
}

impl AnalyticsAggregator {
    pub fn new(repositories: Arc<Repositories>) -> Self {
        Self { repositories }
    }

    /// Recompute and persist analytics for one event.
    ///
    /// None means the event does not exist; that is distinct from an
    /// existing event with an empty window, which yields (and stores) a
    /// record with every statistic unset.
    ///
    /// The window runs from the event's start to its stored end time when
    /// resolved, or to now while the market is still moving. Tie-breaks:
    /// min and max keep the first point at the extreme price in iteration
    /// order; last keeps the first point carrying the maximum timestamp.
    pub fn update(&self, event_id: &str) -> Option<EventAnalytics> {
        let event = self.repositories.events.get(event_id)?;

        let end = if event.status == EventStatus::Resolved {
            event.end_time
        } else {
            Some(Utc::now())
        };

        let mut points =
            self.repositories
                .prices
                .list_in_window(&event.market_id, event.start_time, end);

        let Some(first) = points.next() else {
            debug!("No price points in window for event {}", event_id);
            let analytics = EventAnalytics::empty(&event.event_id);
            self.repositories.analytics.upsert(analytics.clone());
            return Some(analytics);
        };

        let mut min = first.clone();
        let mut max = first.clone();
        let mut last = first;

        for point in points {
            if point.price < min.price {
                min = point.clone();
            }
            if point.price > max.price {
                max = point.clone();
            }
            if point.timestamp > last.timestamp {
                last = point;
            }
        }

        let analytics = EventAnalytics {
            event_id: event.event_id.clone(),
            min_price: Some(min.price),
            min_price_time: Some(min.timestamp),
            max_price: Some(max.price),
            max_price_time: Some(max.timestamp),
            last_price: Some(last.price),
            last_price_time: Some(last.timestamp),
        };

        self.repositories.analytics.upsert(analytics.clone());
        Some(analytics)
    }

    /// Read path: the stored record, computed lazily on first access
    pub fn get_or_update(&self, event_id: &str) -> Option<EventAnalytics> {
        if let Some(existing) = self.repositories.analytics.get(event_id) {
            return Some(existing);
        }
        self.update(event_id)
    }
}
