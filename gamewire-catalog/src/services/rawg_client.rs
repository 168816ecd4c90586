//! Catalog API client
//!
//! Translates a resource path plus filter pairs into one GET request against
//! the upstream game metadata API and decodes the JSON body. The static
//! credential rides along as the `key` query parameter on every call.
//!
//! No retry, caching, de-duplication or concurrency limiting happens here;
//! failures propagate to the caller unchanged.

use async_trait::async_trait;
use gamewire_common::config::CatalogConfig;
use gamewire_common::models::{
    CatalogFacet, CatalogItem, DiscussionPost, GameDetail, Page, RatingBucket, Screenshot,
};
use gamewire_common::CatalogQuery;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use super::catalog_source::CatalogSource;

const USER_AGENT: &str = concat!("gamewire/", env!("CARGO_PKG_VERSION"));

/// Name of the credential query parameter
pub const API_KEY_PARAM: &str = "key";

/// Catalog client errors
#[derive(Debug, Error)]
pub enum RawgError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Result type shared by every catalog query
pub type RawgResult<T> = Result<T, RawgError>;

/// HTTP client for the catalog API
///
/// Base address and credential are fixed at construction.
#[derive(Clone)]
pub struct RawgClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RawgClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> RawgResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| RawgError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| RawgError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Build a client from resolved configuration
    pub fn from_config(config: &CatalogConfig) -> RawgResult<Self> {
        Self::new(&config.base_url, &config.api_key, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the GET request for a resource path
    ///
    /// The credential pair comes first, followed by every caller pair in
    /// insertion order with keys and values untouched.
    pub fn build_request(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> RawgResult<reqwest::Request> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        self.http_client
            .get(&url)
            .query(&[(API_KEY_PARAM, self.api_key.as_str())])
            .query(params)
            .build()
            .map_err(|e| RawgError::InvalidBaseUrl(format!("{}: {}", url, e)))
    }

    /// Issue one GET and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> RawgResult<T> {
        let request = self.build_request(path, params)?;

        tracing::debug!(path = %path, params = ?params, "Querying catalog API");

        let result = self.send(path, request).await;
        if let Err(e) = &result {
            tracing::error!(path = %path, error = %e, "Catalog request failed");
        }
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::Request,
    ) -> RawgResult<T> {
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| RawgError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RawgError::NotFound(path.to_string()));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RawgError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RawgError::ApiError(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| RawgError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for RawgClient {
    async fn list_games(&self, query: &CatalogQuery) -> RawgResult<Page<CatalogItem>> {
        let page: Page<CatalogItem> = self.get_json("games", query.pairs()).await?;
        tracing::info!(
            returned = page.results.len(),
            total = ?page.count,
            "Retrieved game listing"
        );
        Ok(page)
    }

    async fn game_details(&self, game_id: u64) -> RawgResult<GameDetail> {
        let detail: GameDetail = self.get_json(&format!("games/{}", game_id), &[]).await?;
        tracing::info!(game_id, name = %detail.item.name, "Retrieved game details");
        Ok(detail)
    }

    async fn game_screenshots(&self, game_id: u64) -> RawgResult<Page<Screenshot>> {
        self.get_json(&format!("games/{}/screenshots", game_id), &[])
            .await
    }

    async fn game_ratings(&self, game_id: u64) -> RawgResult<Page<RatingBucket>> {
        self.get_json(&format!("games/{}/ratings", game_id), &[])
            .await
    }

    async fn game_discussion(&self, game_id: u64) -> RawgResult<Page<DiscussionPost>> {
        self.get_json(&format!("games/{}/reddit", game_id), &[])
            .await
    }

    async fn platforms(&self) -> RawgResult<Page<CatalogFacet>> {
        self.get_json("platforms", &[]).await
    }

    async fn genres(&self) -> RawgResult<Page<CatalogFacet>> {
        self.get_json("genres", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RawgClient {
        RawgClient::new("https://catalog.example/api/", "secret", None).unwrap()
    }

    fn query_pairs(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_client_creation() {
        let client = client();
        assert_eq!(client.base_url(), "https://catalog.example/api");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = RawgClient::new("not a url", "secret", None);
        assert!(matches!(result, Err(RawgError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_request_always_carries_key() {
        let request = client().build_request("games/42", &[]).unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/api/games/42");
        assert_eq!(
            query_pairs(&request),
            vec![("key".to_string(), "secret".to_string())]
        );
    }

    #[test]
    fn test_request_passes_params_through() {
        let query = CatalogQuery::new()
            .param("dates", "2024-01-01,2024-03-31")
            .param("search", "half life & friends")
            .param("metacritic", "80,100");

        let request = client().build_request("/games", query.pairs()).unwrap();
        let pairs = query_pairs(&request);

        assert_eq!(pairs[0], ("key".to_string(), "secret".to_string()));
        assert_eq!(&pairs[1..], query.pairs());
    }
}
