//! Catalog wire models
//!
//! Shapes returned by the upstream game metadata API plus the review record
//! the rendering layer expects. Every entity is owned upstream; these types
//! only live for as long as a view holds them.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Decode an explicit JSON `null` as the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paged list envelope used by every collection endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Total number of matches upstream (all pages)
    #[serde(default)]
    pub count: Option<u64>,
    /// URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any
    #[serde(default)]
    pub previous: Option<String>,
    /// Entries on this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Page holding the given entries and nothing else
    pub fn of(results: Vec<T>) -> Self {
        Self {
            count: Some(results.len() as u64),
            next: None,
            previous: None,
            results,
        }
    }
}

/// Named reference to a genre, developer or publisher
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Platform wrapper as embedded in a game record
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlatformEntry {
    pub platform: NamedRef,
}

/// A single game record
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogItem {
    /// Upstream game identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Cover image URL
    #[serde(default)]
    pub background_image: Option<String>,
    /// Community rating on a 0-5 scale
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    /// Number of community ratings
    #[serde(default, deserialize_with = "null_as_default")]
    pub ratings_count: u64,
    /// Critic score (0-100)
    #[serde(default)]
    pub metacritic: Option<u32>,
    /// Release date
    #[serde(default)]
    pub released: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<PlatformEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub developers: Vec<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publishers: Vec<NamedRef>,
}

impl CatalogItem {
    /// True when the record carries a non-empty cover image URL
    pub fn has_cover_image(&self) -> bool {
        self.background_image
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// True when the record has a non-zero rating backed by at least one vote
    pub fn is_rated(&self) -> bool {
        self.rating > 0.0 && self.ratings_count > 0
    }

    /// True when the record carries a non-zero critic score
    pub fn has_critic_score(&self) -> bool {
        self.metacritic.is_some_and(|score| score > 0)
    }

    /// First genre name, or `Game` when the record lists none
    pub fn primary_genre(&self) -> &str {
        self.genres.first().map(|g| g.name.as_str()).unwrap_or("Game")
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }

    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms.iter().map(|p| p.platform.name.as_str()).collect()
    }

    pub fn developer_names(&self) -> Vec<&str> {
        self.developers.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn publisher_names(&self) -> Vec<&str> {
        self.publishers.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Full game record from the detail endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GameDetail {
    #[serde(flatten)]
    pub item: CatalogItem,
    /// Plain-text description
    #[serde(default)]
    pub description_raw: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Screenshot attached to a game
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Screenshot {
    pub id: u64,
    pub image: String,
}

/// Share of raters who gave a game a particular score
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RatingBucket {
    pub id: u64,
    /// Bucket label (e.g. "exceptional", "meh")
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Number of raters in this bucket
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    /// Percentage of all raters (0-100)
    #[serde(default, deserialize_with = "null_as_default")]
    pub percent: f64,
}

/// Externally authored community discussion post
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DiscussionPost {
    pub id: u64,
    /// Post title
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Post body
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// Creation time exactly as sent upstream
    #[serde(default)]
    pub created: Option<String>,
    /// Community score of the post
    #[serde(default)]
    pub score: Option<i64>,
}

impl DiscussionPost {
    /// Body text if present and non-empty, else the post title
    pub fn body(&self) -> &str {
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => &self.name,
        }
    }
}

/// Catalog facet (platform or genre) from the listing endpoints
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CatalogFacet {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub games_count: Option<u64>,
    #[serde(default)]
    pub image_background: Option<String>,
}

/// Where a synthesized review came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    Discussion,
    RatingBucket,
}

/// Author block of a synthesized review
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReviewAuthor {
    pub username: String,
    pub avatar: Option<String>,
}

/// Review-shaped record assembled client-side
///
/// The upstream API has no free-text review resource, so these are built
/// from discussion posts and rating buckets.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SynthesizedReview {
    /// `post-<upstream id>` or `rating-<bucket index>`
    pub id: String,
    /// Rating on a 0-5 scale
    pub rating: f64,
    pub text: String,
    /// Post timestamp as sent upstream, or the RFC 3339 assembly time for
    /// rating buckets
    pub created: Option<String>,
    /// Post score or bucket vote count
    pub likes: i64,
    pub user: ReviewAuthor,
    pub source: ReviewSource,
}
