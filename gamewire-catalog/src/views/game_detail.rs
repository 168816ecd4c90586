//! Game detail view
//!
//! Details, screenshots and reviews are fetched concurrently for one game id
//! and published together. Details or screenshots failing fails the whole
//! batch; reviews degrade to an empty list on their own.

use gamewire_common::models::{GameDetail, Screenshot, SynthesizedReview};
use serde::Serialize;
use std::sync::Arc;

use super::loader::Loader;
use crate::services::{reviews_or_empty, CatalogSource, RawgError, RawgResult};

/// Screenshots shown before "show all"
pub const SCREENSHOT_PREVIEW_COUNT: usize = 4;

pub const DETAIL_FAILURE: &str = "Failed to fetch game details";

/// Everything the detail view renders for one game
#[derive(Debug, Clone, Serialize)]
pub struct GameDetailBundle {
    pub game: GameDetail,
    pub screenshots: Vec<Screenshot>,
    pub reviews: Vec<SynthesizedReview>,
}

impl GameDetailBundle {
    pub fn visible_screenshots(&self, show_all: bool) -> &[Screenshot] {
        if show_all {
            &self.screenshots
        } else {
            let end = self.screenshots.len().min(SCREENSHOT_PREVIEW_COUNT);
            &self.screenshots[..end]
        }
    }

    pub fn has_more_screenshots(&self) -> bool {
        self.screenshots.len() > SCREENSHOT_PREVIEW_COUNT
    }
}

/// Fetch the three parts of a detail bundle as one batch
pub async fn fetch_game_bundle(
    source: &dyn CatalogSource,
    game_id: u64,
) -> RawgResult<GameDetailBundle> {
    let (game, screenshots, reviews) = tokio::try_join!(
        source.game_details(game_id),
        source.game_screenshots(game_id),
        async { Ok::<_, RawgError>(reviews_or_empty(source, game_id).await) }
    )?;

    Ok(GameDetailBundle {
        game,
        screenshots: screenshots.results,
        reviews,
    })
}

pub type GameDetailView = Loader<u64, GameDetailBundle>;

/// Detail view keyed by game id; `reset()` closes it
pub fn game_detail_view(source: Arc<dyn CatalogSource>) -> GameDetailView {
    Loader::new("game_detail", DETAIL_FAILURE, move |game_id: u64| {
        let source = Arc::clone(&source);
        async move { fetch_game_bundle(source.as_ref(), game_id).await }
    })
}
