//! Data model for tracked events, price samples, and derived analytics

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a tracked event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Market is live and still being priced
    Active,
    /// Market is closed for trading but not yet resolved
    Closed,
    /// Market has resolved to a final outcome
    Resolved,
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Active
    }
}

/// One market/question tracked for analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Provider-side event identifier (primary key in storage)
    pub event_id: String,

    /// Identifier of the tradable market backing this event.
    /// May equal `event_id`, the provider does not guarantee either way.
    pub market_id: String,

    /// CLOB token whose price is sampled for this event
    pub token_id: String,

    /// Human-readable question/title
    pub title: String,

    /// Raw category label as returned by the provider
    pub category: String,

    /// When the event opens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// When the event closes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    /// Free-text outcome description, present once resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    /// Current lifecycle status
    #[serde(default)]
    pub status: EventStatus,
}

impl Event {
    /// Check whether the event is still live
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }
}

/// One observed price for a market's token at an instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    /// Market the token belongs to
    pub market_id: String,

    /// Token that was priced
    pub token_id: String,

    /// When the sample was taken
    pub timestamp: DateTime<Utc>,

    /// Observed price. Expected range is [0, 1] (a probability) but the
    /// provider does not enforce it, so neither do we.
    pub price: Decimal,
}

/// Derived price summary for one event
///
/// Each (price, time) pair is set or unset as a unit: all three pairs are
/// absent when no price points fell inside the aggregation window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAnalytics {
    pub event_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price_time: Option<DateTime<Utc>>,
}

impl EventAnalytics {
    /// Create an analytics record with every statistic unset
    pub fn empty(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            min_price: None,
            min_price_time: None,
            max_price: None,
            max_price_time: None,
            last_price: None,
            last_price_time: None,
        }
    }

    /// Check whether any statistic is set
    pub fn has_data(&self) -> bool {
        self.last_price.is_some()
    }
}
