//! View endpoints
//!
//! Each request mounts a fresh view, loads it with the request's key and
//! returns the settled snapshot. A failed view answers 502 with the same body
//! shape as a successful one.

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use gamewire_common::models::{CatalogItem, SynthesizedReview};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::services::reviews_or_empty;
use crate::views::catalog::{platform_title, search_title, CRITICS_TITLE};
use crate::views::{
    critic_list, game_detail_view, news_list, platform_list, search_list, GameDetailBundle,
    NewsKind, Phase, ViewSnapshot,
};
use crate::AppState;

/// List view state as served to the front-end
#[derive(Debug, Serialize)]
pub struct ListViewResponse {
    pub title: String,
    pub phase: Phase,
    pub items: Vec<CatalogItem>,
    pub error: Option<String>,
}

/// Detail view state as served to the front-end
#[derive(Debug, Serialize)]
pub struct DetailViewResponse {
    pub title: String,
    pub phase: Phase,
    pub detail: Option<GameDetailBundle>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

fn status_for(phase: Phase) -> StatusCode {
    if phase == Phase::Failed {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    }
}

async fn list_response(
    state: &AppState,
    title: String,
    snapshot: ViewSnapshot<Vec<CatalogItem>>,
) -> Response {
    if let Some(error) = &snapshot.error {
        state.record_error(format!("{}: {}", title, error)).await;
    }

    let body = ListViewResponse {
        title,
        phase: snapshot.phase,
        items: snapshot.value.unwrap_or_default(),
        error: snapshot.error,
    };
    (status_for(body.phase), Json(body)).into_response()
}

/// GET /api/news/:kind
pub async fn news(State(state): State<AppState>, Path(kind): Path<String>) -> ApiResult<Response> {
    let kind: NewsKind = kind.parse()?;
    tracing::debug!(kind = %kind, "Loading news view");

    let view = news_list(Arc::clone(&state.source));
    let snapshot = view.settle(kind).await;
    Ok(list_response(&state, kind.title().to_string(), snapshot).await)
}

/// GET /api/critics
pub async fn critics(State(state): State<AppState>) -> Response {
    let view = critic_list(Arc::clone(&state.source));
    let snapshot = view.settle(()).await;
    list_response(&state, CRITICS_TITLE.to_string(), snapshot).await
}

/// GET /api/platforms/:platform
pub async fn platform(State(state): State<AppState>, Path(platform_id): Path<String>) -> Response {
    let view = platform_list(Arc::clone(&state.source));
    let title = platform_title(&platform_id);
    let snapshot = view.settle(platform_id).await;
    list_response(&state, title, snapshot).await
}

/// GET /api/search?q=
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let view = search_list(Arc::clone(&state.source));
    let title = search_title(&params.q);
    let snapshot = view.settle(params.q).await;
    list_response(&state, title, snapshot).await
}

/// GET /api/games/:id
pub async fn game(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Response> {
    let Path(game_id) = path?;
    let view = game_detail_view(Arc::clone(&state.source));
    let snapshot = view.settle(game_id).await;

    let title = snapshot
        .value
        .as_ref()
        .map(|bundle| bundle.game.item.name.clone())
        .unwrap_or_else(|| "Game Details".to_string());

    if let Some(error) = &snapshot.error {
        state
            .record_error(format!("game {}: {}", game_id, error))
            .await;
    }

    let body = DetailViewResponse {
        title,
        phase: snapshot.phase,
        detail: snapshot.value,
        error: snapshot.error,
    };
    Ok((status_for(body.phase), Json(body)).into_response())
}

/// GET /api/games/:id/reviews
///
/// 200 for any numeric id; upstream failures yield an empty list.
pub async fn game_reviews(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Vec<SynthesizedReview>>> {
    let Path(game_id) = path?;
    Ok(Json(reviews_or_empty(state.source.as_ref(), game_id).await))
}

/// Build view routes
pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/api/news/:kind", get(news))
        .route("/api/critics", get(critics))
        .route("/api/platforms/:platform", get(platform))
        .route("/api/search", get(search))
        .route("/api/games/:id", get(game))
        .route("/api/games/:id/reviews", get(game_reviews))
}
