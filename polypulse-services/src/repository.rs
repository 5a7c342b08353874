//! In-memory repositories
//!
//! Process-lifetime stores for events, price points, and derived analytics.
//! The repositories exclusively own their state: callers get values or
//! snapshots, never a live handle into the maps. Nothing here persists
//! across restarts.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use polypulse_core::{Event, EventAnalytics, PricePoint};
use std::collections::HashMap;

/// Keyed store of tracked events, primary key `event_id`
#[derive(Default)]
pub struct EventRepository {
    events: RwLock<HashMap<String, Event>>,
}

impl EventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace wholesale; no field-level merge
    pub fn upsert(&self, event: Event) {
        self.events.write().insert(event.event_id.clone(), event);
    }

    /// Point lookup by event id
    pub fn get(&self, event_id: &str) -> Option<Event> {
        self.events.read().get(event_id).cloned()
    }

    /// Equality scan over current values; no index
    pub fn list_by_category(&self, category: &str) -> Vec<Event> {
        self.events
            .read()
            .values()
            .filter(|event| event.category == category)
            .cloned()
            .collect()
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

/// Append-only price series keyed by market id
#[derive(Default)]
pub struct PriceRepository {
    prices: RwLock<HashMap<String, Vec<PricePoint>>>,
}

impl PriceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation; points are never mutated or removed
    pub fn add(&self, point: PricePoint) {
        self.prices
            .write()
            .entry(point.market_id.clone())
            .or_default()
            .push(point);
    }

    /// Defensive copy of a market's full series. A previously obtained
    /// result never observes later appends.
    pub fn list_for_market(&self, market_id: &str) -> Vec<PricePoint> {
        self.prices
            .read()
            .get(market_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Lazy window over a market's series.
    ///
    /// Bounds are inclusive; an absent bound is unconstrained on that side.
    /// The series is snapshotted under the read lock (lock discipline rules
    /// out borrowing from the guard) but the window filter itself applies
    /// on demand as the iterator is driven.
    pub fn list_in_window(
        &self,
        market_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> impl Iterator<Item = PricePoint> {
        self.list_for_market(market_id)
            .into_iter()
            .filter(move |point| {
                start.is_none_or(|s| point.timestamp >= s)
                    && end.is_none_or(|e| point.timestamp <= e)
            })
    }
}

/// Keyed store of derived analytics, primary key `event_id`
#[derive(Default)]
pub struct AnalyticsRepository {
    analytics: RwLock<HashMap<String, EventAnalytics>>,
}

impl AnalyticsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace wholesale
    pub fn upsert(&self, analytics: EventAnalytics) {
        self.analytics
            .write()
            .insert(analytics.event_id.clone(), analytics);
    }

    /// Point lookup by event id
    pub fn get(&self, event_id: &str) -> Option<EventAnalytics> {
        self.analytics.read().get(event_id).cloned()
    }
}

/// The three stores bundled for sharing across the pipeline
#[derive(Default)]
pub struct Repositories {
    pub events: EventRepository,
    pub prices: PriceRepository,
    pub analytics: AnalyticsRepository,
}

impl Repositories {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use polypulse_core::EventStatus;
    use rust_decimal_macros::dec;

    fn event(event_id: &str, category: &str) -> Event {
        Event {
            event_id: event_id.to_string(),
            market_id: format!("m-{}", event_id),
            token_id: "tok".to_string(),
            title: "test".to_string(),
            category: category.to_string(),
            start_time: None,
            end_time: None,
            resolution: None,
            status: EventStatus::Active,
        }
    }

    fn point(market_id: &str, hour: u32, minute: u32, price: rust_decimal::Decimal) -> PricePoint {
        PricePoint {
            market_id: market_id.to_string(),
            token_id: "tok".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0).unwrap(),
            price,
        }
    }

    #[test]
    fn test_upsert_overwrites_wholesale() {
        let repo = EventRepository::new();
        repo.upsert(event("e1", "crypto/15M"));

        let mut updated = event("e1", "crypto/15M");
        updated.title = "renamed".to_string();
        repo.upsert(updated);

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get("e1").unwrap().title, "renamed");
    }

    #[test]
    fn test_list_by_category_is_equality_scan() {
        let repo = EventRepository::new();
        repo.upsert(event("e1", "crypto/15M"));
        repo.upsert(event("e2", "crypto"));

        let listed = repo.list_by_category("crypto/15M");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].event_id, "e1");
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let repo = PriceRepository::new();
        repo.add(point("m1", 9, 0, dec!(0.40)));
        repo.add(point("m1", 9, 10, dec!(0.50)));
        repo.add(point("m1", 9, 30, dec!(0.55)));

        let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 9, 10, 0).unwrap();

        let windowed: Vec<_> = repo.list_in_window("m1", Some(start), Some(end)).collect();
        assert_eq!(windowed.len(), 2);
        assert_eq!(windowed[0].timestamp, start);
        assert_eq!(windowed[1].timestamp, end);
    }

    #[test]
    fn test_absent_bound_is_unconstrained() {
        let repo = PriceRepository::new();
        repo.add(point("m1", 9, 0, dec!(0.40)));
        repo.add(point("m1", 9, 30, dec!(0.55)));

        assert_eq!(repo.list_in_window("m1", None, None).count(), 2);

        let end = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        assert_eq!(repo.list_in_window("m1", None, Some(end)).count(), 1);

        let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        assert_eq!(repo.list_in_window("m1", Some(start), None).count(), 1);
    }

    #[test]
    fn test_list_for_market_is_a_defensive_copy() {
        let repo = PriceRepository::new();
        repo.add(point("m1", 9, 0, dec!(0.40)));

        let held = repo.list_for_market("m1");
        repo.add(point("m1", 9, 30, dec!(0.55)));

        assert_eq!(held.len(), 1);
        assert_eq!(repo.list_for_market("m1").len(), 2);
    }

    #[test]
    fn test_unknown_market_yields_empty_series() {
        let repo = PriceRepository::new();
        assert!(repo.list_for_market("missing").is_empty());
        assert_eq!(repo.list_in_window("missing", None, None).count(), 0);
    }
}
