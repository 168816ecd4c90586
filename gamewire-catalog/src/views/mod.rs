//! View-state containers
//!
//! A view owns the state for one screen: the current key, the fetched value,
//! the lifecycle phase and a user-facing error message. Views are cheap to
//! clone; clones share state.

pub mod catalog;
pub mod game_detail;
pub mod loader;
pub mod queried_list;

pub use catalog::{
    critic_list, news_list, platform_list, search_list, CatalogList, NewsKind,
    NEWS_DISPLAY_LIMIT,
};
pub use game_detail::{
    fetch_game_bundle, game_detail_view, GameDetailBundle, GameDetailView,
    SCREENSHOT_PREVIEW_COUNT,
};
pub use loader::{LoadOutcome, Loader, Phase, ViewSnapshot};
pub use queried_list::{apply_filter, QueriedList};
