//! Process configuration
//!
//! Environment variables with defaults; the core crates receive explicit
//! values and never read the environment themselves.

use polypulse_gamma::types::{CLOB_API_BASE, GAMMA_API_BASE};

/// Default category the event listing serves
const DEFAULT_CATEGORY_FILTER: &str = "crypto/15M";

/// Broad parent category used for tag-indexed collection
const DEFAULT_BROAD_CATEGORY: &str = "crypto";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub gamma_base_url: String,
    pub clob_base_url: String,
    pub category_filter: String,
    pub broad_category: String,
    pub port: u16,
}

impl Settings {
    /// Load settings from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            gamma_base_url: std::env::var("GAMMA_BASE_URL")
                .unwrap_or_else(|_| GAMMA_API_BASE.to_string()),
            clob_base_url: std::env::var("CLOB_BASE_URL")
                .unwrap_or_else(|_| CLOB_API_BASE.to_string()),
            category_filter: std::env::var("CATEGORY_FILTER")
                .unwrap_or_else(|_| DEFAULT_CATEGORY_FILTER.to_string()),
            broad_category: std::env::var("BROAD_CATEGORY")
                .unwrap_or_else(|_| DEFAULT_BROAD_CATEGORY.to_string()),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
        }
    }
}
