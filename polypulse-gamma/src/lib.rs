//! Polymarket gateway for the crypto analytics service
//!
//! This crate wraps the two public Polymarket APIs the pipeline depends on:
//! the Gamma API for market/event/tag metadata and the CLOB API for spot
//! token prices. Neither endpoint requires authentication.
//!
//! Responses are kept deliberately loose: every provider field is optional
//! and the raw types expose field-presence helpers instead of assuming a
//! fixed schema. Normalization into the canonical model happens downstream.

pub mod client;
pub mod types;

pub use client::{ClobClient, GammaClient};
pub use types::{ClobPriceResponse, GammaMarket, GammaTag};
