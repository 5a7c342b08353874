//! Core types for the Polymarket crypto analytics service
//!
//! This crate defines the shared data structures used across the pipeline:
//! tracked events, sampled price points, and derived analytics.

pub mod error;
pub mod event;

pub use error::{PulseError, PulseResult};
pub use event::{Event, EventAnalytics, EventStatus, PricePoint};
