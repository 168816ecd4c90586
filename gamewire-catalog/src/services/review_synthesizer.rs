//! Review synthesis
//!
//! The catalog API has no free-text review resource. Reviews are assembled
//! from two unrelated collections fetched concurrently for the same game:
//! community discussion posts and the rating distribution buckets.
//!
//! Output order: every discussion-derived review, then every bucket-derived
//! review, each group in upstream order.

use chrono::{DateTime, Utc};
use gamewire_common::models::{
    DiscussionPost, RatingBucket, ReviewAuthor, ReviewSource, SynthesizedReview,
};

use gamewire_common::time;

use super::catalog_source::CatalogSource;
use super::rawg_client::RawgResult;

/// Rating assigned to every discussion-derived review (top of the 0-5 scale)
pub const DISCUSSION_RATING: f64 = 5.0;

/// Author shown for posts without a username
pub const ANONYMOUS_POSTER: &str = "Reddit User";

/// Rescale a 0-100 percentage to the 0-5 rating scale (no clamping)
pub fn bucket_rating(percent: f64) -> f64 {
    percent / 20.0
}

fn review_from_post(post: &DiscussionPost) -> SynthesizedReview {
    SynthesizedReview {
        id: format!("post-{}", post.id),
        rating: DISCUSSION_RATING,
        text: post.body().to_string(),
        created: post.created.clone(),
        likes: post.score.unwrap_or(0),
        user: ReviewAuthor {
            username: post
                .username
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| ANONYMOUS_POSTER.to_string()),
            avatar: None,
        },
        source: ReviewSource::Discussion,
    }
}

fn review_from_bucket(
    index: usize,
    bucket: &RatingBucket,
    assembled_at: DateTime<Utc>,
) -> SynthesizedReview {
    SynthesizedReview {
        id: format!("rating-{}", index),
        rating: bucket_rating(bucket.percent),
        text: bucket.title.clone(),
        created: Some(assembled_at.to_rfc3339()),
        likes: i64::try_from(bucket.count).unwrap_or(i64::MAX),
        user: ReviewAuthor {
            username: format!("{} Rating", bucket.title),
            avatar: None,
        },
        source: ReviewSource::RatingBucket,
    }
}

/// Map posts and buckets into review records
///
/// `assembled_at` stamps the bucket-derived records, which carry no
/// timestamp upstream.
pub fn assemble_reviews(
    posts: &[DiscussionPost],
    buckets: &[RatingBucket],
    assembled_at: DateTime<Utc>,
) -> Vec<SynthesizedReview> {
    let mut reviews = Vec::with_capacity(posts.len() + buckets.len());
    reviews.extend(posts.iter().map(review_from_post));
    reviews.extend(
        buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| review_from_bucket(index, bucket, assembled_at)),
    );
    reviews
}

/// Fetch ratings and discussion concurrently and assemble reviews
///
/// Fails if either query fails; no partial list is returned.
pub async fn synthesize_reviews(
    source: &dyn CatalogSource,
    game_id: u64,
) -> RawgResult<Vec<SynthesizedReview>> {
    let (ratings, discussion) = tokio::try_join!(
        source.game_ratings(game_id),
        source.game_discussion(game_id)
    )?;

    let reviews = assemble_reviews(&discussion.results, &ratings.results, time::now());

    tracing::debug!(
        game_id,
        posts = discussion.results.len(),
        buckets = ratings.results.len(),
        "Synthesized reviews"
    );

    Ok(reviews)
}

/// Like [`synthesize_reviews`], but any failure degrades to an empty list
pub async fn reviews_or_empty(source: &dyn CatalogSource, game_id: u64) -> Vec<SynthesizedReview> {
    match synthesize_reviews(source, game_id).await {
        Ok(reviews) => reviews,
        Err(e) => {
            tracing::error!(game_id, error = %e, "Error fetching game reviews, showing none");
            Vec::new()
        }
    }
}
