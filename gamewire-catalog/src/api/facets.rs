//! Catalog facet listings (platforms, genres)

use axum::{extract::State, routing::get, Json, Router};
use gamewire_common::models::CatalogFacet;

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/facets/platforms
pub async fn platforms(State(state): State<AppState>) -> ApiResult<Json<Vec<CatalogFacet>>> {
    let page = state.source.platforms().await?;
    Ok(Json(page.results))
}

/// GET /api/facets/genres
pub async fn genres(State(state): State<AppState>) -> ApiResult<Json<Vec<CatalogFacet>>> {
    let page = state.source.genres().await?;
    Ok(Json(page.results))
}

pub fn facet_routes() -> Router<AppState> {
    Router::new()
        .route("/api/facets/platforms", get(platforms))
        .route("/api/facets/genres", get(genres))
}
