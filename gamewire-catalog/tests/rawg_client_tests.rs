//! Catalog client tests against a local fake upstream

mod helpers;

use axum::http::StatusCode;
use gamewire_catalog::services::{reviews_or_empty, CatalogSource, RawgClient, RawgError};
use gamewire_common::models::ReviewSource;
use gamewire_common::CatalogQuery;
use helpers::fake_upstream::FakeUpstream;
use serde_json::json;

fn client(upstream: &FakeUpstream) -> RawgClient {
    RawgClient::new(&upstream.base_url, "test-key", None).expect("Should build client")
}

#[tokio::test]
async fn test_list_games_forwards_params_verbatim() {
    let upstream = FakeUpstream::start().await;
    upstream.respond(
        "games",
        StatusCode::OK,
        json!({
            "count": 1,
            "results": [{"id": 3498, "name": "Grand Theft Auto V", "rating": 4.47, "ratings_count": 6000}]
        }),
    );

    let query = CatalogQuery::new()
        .param("dates", "2024-01-01,2024-03-31")
        .param("ordering", "-released")
        .param("page_size", "40");
    let page = client(&upstream).list_games(&query).await.unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].name, "Grand Theft Auto V");

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/games");
    assert_eq!(
        requests[0].query,
        vec![
            ("key".to_string(), "test-key".to_string()),
            ("dates".to_string(), "2024-01-01,2024-03-31".to_string()),
            ("ordering".to_string(), "-released".to_string()),
            ("page_size".to_string(), "40".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unparameterised_calls_still_send_key() {
    let upstream = FakeUpstream::start().await;
    upstream.respond("games/42/screenshots", StatusCode::OK, json!({"results": []}));

    client(&upstream).game_screenshots(42).await.unwrap();

    let requests = upstream.requests();
    assert_eq!(requests[0].path, "/api/games/42/screenshots");
    assert_eq!(requests[0].param("key"), Some("test-key"));
    assert_eq!(requests[0].query.len(), 1);
}

#[tokio::test]
async fn test_null_lists_decode_as_empty() {
    let upstream = FakeUpstream::start().await;
    upstream.respond(
        "games/7",
        StatusCode::OK,
        json!({
            "id": 7,
            "name": "Braid",
            "rating": null,
            "genres": null,
            "platforms": null,
            "description_raw": "Time puzzles"
        }),
    );

    let detail = client(&upstream).game_details(7).await.unwrap();

    assert_eq!(detail.item.name, "Braid");
    assert!(detail.item.genres.is_empty());
    assert_eq!(detail.item.rating, 0.0);
    assert_eq!(detail.description_raw.as_deref(), Some("Time puzzles"));
}

#[tokio::test]
async fn test_status_mapping() {
    let upstream = FakeUpstream::start().await;
    upstream.respond("games/1", StatusCode::UNAUTHORIZED, json!({"error": "bad key"}));
    upstream.respond("games/2", StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "down"}));
    let client = client(&upstream);

    assert!(matches!(client.game_details(1).await, Err(RawgError::InvalidApiKey)));
    assert!(matches!(client.game_details(2).await, Err(RawgError::ApiError(500, _))));
    assert!(matches!(client.game_details(3).await, Err(RawgError::NotFound(_))));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let upstream = FakeUpstream::start().await;
    upstream.respond("genres", StatusCode::OK, json!({"results": "not a list"}));

    assert!(matches!(
        client(&upstream).genres().await,
        Err(RawgError::ParseError(_))
    ));
}

#[tokio::test]
async fn test_unreachable_upstream_is_network_error() {
    // Port 9 (discard) is not listening locally
    let client = RawgClient::new("http://127.0.0.1:9/api", "k", None).unwrap();
    assert!(matches!(
        client.platforms().await,
        Err(RawgError::NetworkError(_))
    ));
}

#[tokio::test]
async fn test_reviews_assembled_from_both_endpoints() {
    let upstream = FakeUpstream::start().await;
    upstream.respond(
        "games/5/ratings",
        StatusCode::OK,
        json!({"results": [
            {"id": 5, "title": "exceptional", "count": 300, "percent": 60.0},
            {"id": 3, "title": "meh", "count": 50, "percent": 10.0}
        ]}),
    );
    upstream.respond(
        "games/5/reddit",
        StatusCode::OK,
        json!({"results": [
            {"id": 901, "name": "Still holds up", "text": "", "username": "u/alice",
             "created": "2020-06-01T10:00:00", "score": 77}
        ]}),
    );

    let reviews = reviews_or_empty(&client(&upstream), 5).await;

    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[0].source, ReviewSource::Discussion);
    assert_eq!(reviews[0].text, "Still holds up");
    assert_eq!(reviews[0].likes, 77);
    assert_eq!(reviews[0].created.as_deref(), Some("2020-06-01T10:00:00"));
    assert_eq!(reviews[1].id, "rating-0");
    assert_eq!(reviews[1].rating, 3.0);
    assert_eq!(reviews[2].rating, 0.5);
}

#[tokio::test]
async fn test_null_fields_in_review_sources_keep_every_record() {
    let upstream = FakeUpstream::start().await;
    upstream.respond(
        "games/8/ratings",
        StatusCode::OK,
        json!({"results": [
            {"id": 5, "title": "exceptional", "count": 40, "percent": 80.0},
            {"id": 1, "title": "skip", "count": null, "percent": 20.0}
        ]}),
    );
    upstream.respond(
        "games/8/reddit",
        StatusCode::OK,
        json!({"results": [
            {"id": 31, "name": "Worth it", "username": "u/carol",
             "created": "2020-06-14 11:49:48", "score": 4},
            {"id": 32, "name": null, "text": "no title here", "score": null}
        ]}),
    );

    let reviews = reviews_or_empty(&client(&upstream), 8).await;

    assert_eq!(reviews.len(), 4);
    assert_eq!(reviews[0].created.as_deref(), Some("2020-06-14 11:49:48"));
    assert_eq!(reviews[1].text, "no title here");
    assert_eq!(reviews[1].likes, 0);
    assert_eq!(reviews[3].text, "skip");
    assert_eq!(reviews[3].likes, 0);
}

#[tokio::test]
async fn test_review_failure_degrades_to_empty() {
    let upstream = FakeUpstream::start().await;
    upstream.respond("games/5/ratings", StatusCode::OK, json!({"results": []}));
    // reddit endpoint left unconfigured: 404

    let reviews = reviews_or_empty(&client(&upstream), 5).await;
    assert!(reviews.is_empty());
}
