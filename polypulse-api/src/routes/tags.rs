//! Tag listing endpoint (dashboard dropdown feed)

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::error_response;
use crate::AppState;

/// One selectable tag
#[derive(Debug, Serialize)]
struct TagOption {
    id: Option<String>,
    slug: String,
}

/// List crypto-related tags, sorted by slug
async fn list_tags(State(state): State<AppState>) -> impl IntoResponse {
    let tags = match state.gamma.fetch_tags().await {
        Ok(tags) => tags,
        Err(e) => return error_response(e).into_response(),
    };

    let mut options: Vec<TagOption> = tags
        .into_iter()
        .filter_map(|tag| {
            let slug = tag.slug?;
            if !slug.to_lowercase().contains("crypto") {
                return None;
            }
            Some(TagOption { id: tag.id, slug })
        })
        .collect();
    options.sort_by(|a, b| a.slug.cmp(&b.slug));

    Json(options).into_response()
}

/// Create tag routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/options/tags", get(list_tags))
}
