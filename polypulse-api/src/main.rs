//! Polymarket Crypto Analytics API Server
//!
//! HTTP facade over the collection/storage/analytics pipeline. Handlers
//! are thin adapters: all decision logic lives in polypulse-services.

mod config;
mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use config::Settings;
use polypulse_gamma::{ClobClient, GammaClient};
use polypulse_services::{
    AnalyticsAggregator, CollectorConfig, EventCollector, MarketGateway, Repositories, TagResolver,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub repositories: Arc<Repositories>,
    pub collector: Arc<EventCollector>,
    pub aggregator: Arc<AnalyticsAggregator>,
    pub gamma: Arc<GammaClient>,
    pub clob: Arc<ClobClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,polypulse_api=debug")),
        )
        .init();

    info!("Starting Polymarket Crypto Analytics API");

    let settings = Arc::new(Settings::from_env());

    // Initialize clients
    let gamma = Arc::new(GammaClient::with_base_url(settings.gamma_base_url.clone()));
    let clob = Arc::new(ClobClient::with_base_url(settings.clob_base_url.clone()));

    // Initialize the pipeline: stores, resolver, collector, aggregator
    let repositories = Arc::new(Repositories::new());
    let gateway: Arc<dyn MarketGateway> = gamma.clone();
    let resolver = Arc::new(TagResolver::new(gateway.clone()));
    let collector = Arc::new(EventCollector::new(
        gateway,
        repositories.clone(),
        resolver,
        CollectorConfig {
            broad_category: settings.broad_category.clone(),
        },
    ));
    let aggregator = Arc::new(AnalyticsAggregator::new(repositories.clone()));

    let state = AppState {
        settings: settings.clone(),
        repositories,
        collector,
        aggregator,
        gamma,
        clob,
    };

    // Configure CORS for the dashboard
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    let app = Router::new()
        .merge(routes::api_routes())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
