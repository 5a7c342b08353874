//! Collection, storage, and analytics pipeline
//!
//! This crate contains the pipeline core: the gateway seam over the
//! Polymarket clients, tag resolution, raw-record normalization, the
//! event collector, the in-memory repositories, and the analytics
//! aggregator. Data flows gateway -> normalizer -> event store, with
//! price samples appended independently and analytics derived on demand.

pub mod aggregator;
pub mod collector;
pub mod gateway;
pub mod normalizer;
pub mod repository;
pub mod resolver;

#[cfg(test)]
mod testutil;

pub use aggregator::AnalyticsAggregator;
pub use collector::{CollectorConfig, EventCollector};
pub use gateway::MarketGateway;
pub use normalizer::{category_matches, normalize, normalize_label, parse_timestamp};
pub use repository::{AnalyticsRepository, EventRepository, PriceRepository, Repositories};
pub use resolver::TagResolver;
