//! Event read endpoints

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use super::{bad_request, not_found};
use crate::AppState;

/// Query parameters for listing events
#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    /// Category to scan for; defaults to the configured filter
    pub category: Option<String>,
}

/// Query parameters for price history
#[derive(Debug, Deserialize)]
pub struct PriceHistoryQuery {
    pub event_id: Option<String>,
}

/// List stored events for a category
async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsQuery>,
) -> impl IntoResponse {
    let category = params
        .category
        .unwrap_or_else(|| state.settings.category_filter.clone());

    info!("Listing events for category {:?}", category);
    Json(state.repositories.events.list_by_category(&category))
}

/// Point lookup of one stored event
async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> impl IntoResponse {
    match state.repositories.events.get(&event_id) {
        Some(event) => Json(event).into_response(),
        None => not_found("Event not found").into_response(),
    }
}

/// Analytics for one event, computed lazily on first access
async fn get_event_analytics(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> impl IntoResponse {
    match state.aggregator.get_or_update(&event_id) {
        Some(analytics) => Json(analytics).into_response(),
        None => not_found("Event not found").into_response(),
    }
}

/// Full stored price series for an event's market
async fn price_history(
    State(state): State<AppState>,
    Query(params): Query<PriceHistoryQuery>,
) -> impl IntoResponse {
    let Some(event_id) = params.event_id else {
        return bad_request("event_id is required").into_response();
    };

    // The series is keyed by market id; fall back to the raw id for
    // samples taken before the event was collected.
    let market_id = state
        .repositories
        .events
        .get(&event_id)
        .map(|event| event.market_id)
        .unwrap_or(event_id);

    Json(state.repositories.prices.list_for_market(&market_id)).into_response()
}

/// Create event routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/price-history", get(price_history))
        .route("/events/{event_id}", get(get_event))
        .route("/events/{event_id}/analytics", get(get_event_analytics))
}
