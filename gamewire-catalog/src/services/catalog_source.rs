//! Catalog source abstraction
//!
//! Views and the review transform depend on this trait rather than on the
//! HTTP client directly, so they can run against an in-memory catalog.

use async_trait::async_trait;
use gamewire_common::models::{
    CatalogFacet, CatalogItem, DiscussionPost, GameDetail, Page, RatingBucket, Screenshot,
};
use gamewire_common::CatalogQuery;

use super::rawg_client::RawgResult;

/// Read-only queries against the upstream game catalog
///
/// Every call is all-or-nothing: an `Err` carries no partial data.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// List games matching the query filters
    async fn list_games(&self, query: &CatalogQuery) -> RawgResult<Page<CatalogItem>>;

    /// Full record for one game
    async fn game_details(&self, game_id: u64) -> RawgResult<GameDetail>;

    /// Screenshots attached to one game
    async fn game_screenshots(&self, game_id: u64) -> RawgResult<Page<Screenshot>>;

    /// Rating distribution buckets for one game
    async fn game_ratings(&self, game_id: u64) -> RawgResult<Page<RatingBucket>>;

    /// Community discussion posts about one game
    async fn game_discussion(&self, game_id: u64) -> RawgResult<Page<DiscussionPost>>;

    /// Platform facet listing
    async fn platforms(&self) -> RawgResult<Page<CatalogFacet>>;

    /// Genre facet listing
    async fn genres(&self) -> RawgResult<Page<CatalogFacet>>;
}
