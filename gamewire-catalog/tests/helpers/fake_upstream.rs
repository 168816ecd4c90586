//! In-process stand-in for the catalog API
//!
//! Binds an axum server to an ephemeral local port, records every request it
//! receives and answers from a path-keyed table of canned JSON bodies.
//! Unknown paths answer 404.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// One request as seen by the fake upstream
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Default)]
struct Shared {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
}

pub struct FakeUpstream {
    /// Base address to hand to the client (`http://127.0.0.1:<port>/api`)
    pub base_url: String,
    shared: Shared,
    server: JoinHandle<()>,
}

async fn answer(State(shared): State<Shared>, uri: Uri) -> Response {
    let query = uri
        .query()
        .map(|raw| {
            reqwest::Url::parse(&format!("http://upstream/?{}", raw))
                .map(|url| {
                    url.query_pairs()
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default()
        })
        .unwrap_or_default();

    shared.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        query,
    });

    match shared.responses.lock().unwrap().get(uri.path()) {
        Some((status, body)) => (*status, Json(body.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new().fallback(answer).with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind ephemeral port");
        let addr = listener.local_addr().expect("Should have local address");

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake upstream failed");
        });

        Self {
            base_url: format!("http://{}/api", addr),
            shared,
            server,
        }
    }

    /// Answer `GET /api/<path>` with `status` and `body`
    pub fn respond(&self, path: &str, status: StatusCode, body: Value) {
        let full = format!("/api/{}", path.trim_start_matches('/'));
        self.shared
            .responses
            .lock()
            .unwrap()
            .insert(full, (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.server.abort();
    }
}
