//! In-memory catalog for view and HTTP tests

use async_trait::async_trait;
use gamewire_catalog::services::{CatalogSource, RawgError, RawgResult};
use gamewire_common::models::{
    CatalogFacet, CatalogItem, DiscussionPost, GameDetail, Page, RatingBucket, Screenshot,
};
use gamewire_common::CatalogQuery;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// Catalog operations a test can make fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListGames,
    Details,
    Screenshots,
    Ratings,
    Discussion,
    Facets,
}

#[derive(Default)]
pub struct StubCatalog {
    pub games: Vec<CatalogItem>,
    pub screenshots: Vec<Screenshot>,
    pub ratings: Vec<RatingBucket>,
    pub posts: Vec<DiscussionPost>,
    pub facets: Vec<CatalogFacet>,
    pub failing: HashSet<Op>,
    /// Artificial latency for searches, by term
    pub search_delays: HashMap<String, Duration>,
    list_calls: Mutex<Vec<CatalogQuery>>,
}

impl StubCatalog {
    pub fn with_games(games: Vec<CatalogItem>) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    pub fn failing(mut self, op: Op) -> Self {
        self.failing.insert(op);
        self
    }

    /// Every query passed to `list_games`, in call order
    pub fn list_calls(&self) -> Vec<CatalogQuery> {
        self.list_calls.lock().unwrap().clone()
    }

    fn check(&self, op: Op) -> RawgResult<()> {
        if self.failing.contains(&op) {
            Err(RawgError::NetworkError(format!("{:?} unavailable", op)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogSource for StubCatalog {
    async fn list_games(&self, query: &CatalogQuery) -> RawgResult<Page<CatalogItem>> {
        self.list_calls.lock().unwrap().push(query.clone());

        let term = query.get("search").map(str::to_string);
        if let Some(delay) = term.as_ref().and_then(|t| self.search_delays.get(t)) {
            tokio::time::sleep(*delay).await;
        }
        self.check(Op::ListGames)?;

        let games = match term {
            Some(term) => self
                .games
                .iter()
                .filter(|g| g.name.to_lowercase().contains(&term.to_lowercase()))
                .cloned()
                .collect(),
            None => self.games.clone(),
        };
        Ok(Page::of(games))
    }

    async fn game_details(&self, game_id: u64) -> RawgResult<GameDetail> {
        self.check(Op::Details)?;
        self.games
            .iter()
            .find(|g| g.id == game_id)
            .map(|item| GameDetail {
                item: item.clone(),
                description_raw: Some(format!("About {}", item.name)),
                website: None,
            })
            .ok_or_else(|| RawgError::NotFound(format!("games/{}", game_id)))
    }

    async fn game_screenshots(&self, _game_id: u64) -> RawgResult<Page<Screenshot>> {
        self.check(Op::Screenshots)?;
        Ok(Page::of(self.screenshots.clone()))
    }

    async fn game_ratings(&self, _game_id: u64) -> RawgResult<Page<RatingBucket>> {
        self.check(Op::Ratings)?;
        Ok(Page::of(self.ratings.clone()))
    }

    async fn game_discussion(&self, _game_id: u64) -> RawgResult<Page<DiscussionPost>> {
        self.check(Op::Discussion)?;
        Ok(Page::of(self.posts.clone()))
    }

    async fn platforms(&self) -> RawgResult<Page<CatalogFacet>> {
        self.check(Op::Facets)?;
        Ok(Page::of(self.facets.clone()))
    }

    async fn genres(&self) -> RawgResult<Page<CatalogFacet>> {
        self.check(Op::Facets)?;
        Ok(Page::of(self.facets.clone()))
    }
}
