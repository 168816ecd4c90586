//! The four catalog list views
//!
//! Each is a [`QueriedList`] over [`CatalogItem`] with its own canned query,
//! keep-predicate, cap and failure message.

use gamewire_common::models::CatalogItem;
use gamewire_common::platforms::platform_name;
use gamewire_common::{time, CatalogQuery, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::game_detail::{GameDetailBundle, GameDetailView};
use super::loader::ViewSnapshot;
use super::queried_list::QueriedList;
use crate::services::CatalogSource;

/// Most news items shown at once
pub const NEWS_DISPLAY_LIMIT: usize = 20;

pub const GAMES_FAILURE: &str = "Failed to fetch games";
pub const REVIEWS_FAILURE: &str = "Failed to fetch reviews";
pub const SEARCH_FAILURE: &str = "Failed to fetch search results";

pub const CRITICS_TITLE: &str = "Latest Reviews";

pub type CatalogList<K> = QueriedList<K, CatalogItem>;

/// News feed variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsKind {
    Latest,
    Upcoming,
    Popular,
}

impl NewsKind {
    pub const ALL: [NewsKind; 3] = [NewsKind::Latest, NewsKind::Upcoming, NewsKind::Popular];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsKind::Latest => "latest",
            NewsKind::Upcoming => "upcoming",
            NewsKind::Popular => "popular",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            NewsKind::Latest => "Latest Games",
            NewsKind::Upcoming => "Upcoming Games",
            NewsKind::Popular => "Popular Games",
        }
    }

    /// Upstream query for this feed as of `today`
    pub fn query(&self, today: chrono::NaiveDate) -> CatalogQuery {
        match self {
            NewsKind::Latest => CatalogQuery::latest(today),
            NewsKind::Upcoming => CatalogQuery::upcoming(today),
            NewsKind::Popular => CatalogQuery::popular(),
        }
    }

    /// Latest only needs artwork; the others also need a real rating
    pub fn keeps(&self, item: &CatalogItem) -> bool {
        match self {
            NewsKind::Latest => item.has_cover_image(),
            NewsKind::Upcoming | NewsKind::Popular => rated_with_cover(item),
        }
    }
}

impl fmt::Display for NewsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(NewsKind::Latest),
            "upcoming" => Ok(NewsKind::Upcoming),
            "popular" => Ok(NewsKind::Popular),
            other => Err(Error::InvalidInput(format!(
                "Unknown news kind '{}' (expected latest, upcoming or popular)",
                other
            ))),
        }
    }
}

pub fn rated_with_cover(item: &CatalogItem) -> bool {
    item.is_rated() && item.has_cover_image()
}

pub fn critic_scored_with_cover(item: &CatalogItem) -> bool {
    item.has_critic_score() && item.has_cover_image()
}

pub fn platform_title(platform_id: &str) -> String {
    format!("Top {} Games", platform_name(platform_id))
}

pub fn search_title(query: &str) -> String {
    format!("Search Results for \"{}\"", query)
}

/// Blank search terms never reach the network
pub fn is_blank_search(query: &str) -> bool {
    query.trim().is_empty()
}

async fn list_results(
    source: Arc<dyn CatalogSource>,
    query: CatalogQuery,
) -> crate::services::RawgResult<Vec<CatalogItem>> {
    Ok(source.list_games(&query).await?.results)
}

/// News feed, re-queried whenever the kind changes
pub fn news_list(source: Arc<dyn CatalogSource>) -> CatalogList<NewsKind> {
    QueriedList::new(
        "news",
        GAMES_FAILURE,
        move |kind: NewsKind| list_results(Arc::clone(&source), kind.query(time::today())),
        |kind: &NewsKind, item: &CatalogItem| kind.keeps(item),
        Some(NEWS_DISPLAY_LIMIT),
    )
}

/// Top critic-scored games; loaded once per mount
pub fn critic_list(source: Arc<dyn CatalogSource>) -> CatalogList<()> {
    QueriedList::new(
        "critics",
        REVIEWS_FAILURE,
        move |_: ()| list_results(Arc::clone(&source), CatalogQuery::critics()),
        |_: &(), item: &CatalogItem| critic_scored_with_cover(item),
        None,
    )
}

/// Top rated games on one platform
pub fn platform_list(source: Arc<dyn CatalogSource>) -> CatalogList<String> {
    QueriedList::new(
        "platform",
        GAMES_FAILURE,
        move |platform_id: String| {
            list_results(Arc::clone(&source), CatalogQuery::platform(platform_id))
        },
        |_: &String, item: &CatalogItem| rated_with_cover(item),
        None,
    )
}

/// Free-text search results
pub fn search_list(source: Arc<dyn CatalogSource>) -> CatalogList<String> {
    QueriedList::new(
        "search",
        SEARCH_FAILURE,
        move |term: String| list_results(Arc::clone(&source), CatalogQuery::search_term(term)),
        |_: &String, _: &CatalogItem| true,
        None,
    )
    .skip_when(|term: &String| is_blank_search(term))
}

impl<K> QueriedList<K, CatalogItem>
where
    K: Clone + Send + 'static,
{
    /// Select the game at `index` in the current items
    ///
    /// An index past the end clears the selection.
    pub async fn select_index(&self, index: usize) -> Option<u64> {
        match self.items().await.get(index) {
            Some(item) => {
                self.select(item.id).await;
                Some(item.id)
            }
            None => {
                self.clear_selection().await;
                None
            }
        }
    }

    /// Mount the selected game in `detail`, or close it when nothing is selected
    pub async fn open_selected(
        &self,
        detail: &GameDetailView,
    ) -> Option<ViewSnapshot<GameDetailBundle>> {
        match self.selected().await {
            Some(game_id) => Some(detail.settle(game_id).await),
            None => {
                detail.reset().await;
                None
            }
        }
    }
}
