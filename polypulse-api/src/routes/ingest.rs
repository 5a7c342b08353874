//! Ingestion endpoints: collection runs and price sampling

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use polypulse_core::PricePoint;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use super::{bad_request, error_response, not_found};
use crate::AppState;

/// Query parameters for a collection run
#[derive(Debug, Deserialize)]
pub struct IngestEventsQuery {
    pub category: Option<String>,
    pub days: Option<i64>,
    pub event_id: Option<String>,
}

/// Query parameters for sampling an uncollected market
#[derive(Debug, Deserialize)]
pub struct PriceSampleQuery {
    pub event_id: Option<String>,
}

/// Run one collection pass and return the collected batch
async fn ingest_events(
    State(state): State<AppState>,
    Query(params): Query<IngestEventsQuery>,
) -> impl IntoResponse {
    info!("Collection run requested: {:?}", params);

    let result = state
        .collector
        .collect(
            params.category.as_deref(),
            params.days,
            params.event_id.as_deref(),
        )
        .await;

    match result {
        Ok(events) => Json(events).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// Sample the current price for a stored event's token
async fn ingest_price(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> impl IntoResponse {
    let Some(event) = state.repositories.events.get(&event_id) else {
        return not_found("Event not found").into_response();
    };

    let payload = match state.clob.fetch_price(&event.token_id, "buy").await {
        Ok(payload) => payload,
        Err(e) => return error_response(e).into_response(),
    };

    let point = PricePoint {
        market_id: event.market_id,
        token_id: event.token_id,
        timestamp: Utc::now(),
        price: payload.parse_price().unwrap_or(Decimal::ZERO),
    };

    state.repositories.prices.add(point.clone());
    Json(point).into_response()
}

/// Sample the current price for a market that may not be collected yet:
/// resolve the record and its token through the gateway first
async fn sample_price(
    State(state): State<AppState>,
    Query(params): Query<PriceSampleQuery>,
) -> impl IntoResponse {
    let Some(event_id) = params.event_id else {
        return bad_request("event_id is required").into_response();
    };

    let market = match state.gamma.fetch_market_by_id(&event_id).await {
        Ok(Some(market)) => market,
        Ok(None) => return not_found("Market not found for event_id").into_response(),
        Err(e) => return error_response(e).into_response(),
    };

    let Some(token_id) = market.primary_token_id() else {
        return not_found("No clob token id available").into_response();
    };

    let payload = match state.clob.fetch_price(&token_id, "buy").await {
        Ok(payload) => payload,
        Err(e) => return error_response(e).into_response(),
    };

    let point = PricePoint {
        market_id: market.primary_market_id().unwrap_or(event_id),
        token_id,
        timestamp: Utc::now(),
        price: payload.parse_price().unwrap_or(Decimal::ZERO),
    };

    state.repositories.prices.add(point.clone());
    Json(point).into_response()
}

/// Create ingestion routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ingest/events", post(ingest_events))
        .route("/ingest/price/{event_id}", post(ingest_price))
        .route("/events/price-sample", post(sample_price))
}
