//! Plain-text rendering of view state for the command line

use chrono::NaiveDate;
use gamewire_common::models::{CatalogItem, SynthesizedReview};
use serde::Serialize;

use crate::views::{GameDetailBundle, Phase, ViewSnapshot};

/// Critic score colour band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CriticBand {
    Favorable,
    Mixed,
    Unfavorable,
}

impl CriticBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 75 {
            CriticBand::Favorable
        } else if score >= 50 {
            CriticBand::Mixed
        } else {
            CriticBand::Unfavorable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CriticBand::Favorable => "favorable",
            CriticBand::Mixed => "mixed",
            CriticBand::Unfavorable => "unfavorable",
        }
    }
}

/// "N people found this helpful", or nothing for non-positive counts
pub fn helpful_label(likes: i64) -> Option<String> {
    match likes {
        n if n <= 0 => None,
        1 => Some("1 person found this helpful".to_string()),
        n => Some(format!("{} people found this helpful", n)),
    }
}

pub fn format_rating(rating: f64) -> String {
    format!("{:.1}/5", rating)
}

pub fn format_release(released: Option<NaiveDate>) -> String {
    released
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "TBA".to_string())
}

fn critic_label(score: Option<u32>) -> Option<String> {
    score
        .filter(|s| *s > 0)
        .map(|s| format!("{}/100 ({})", s, CriticBand::from_score(s).as_str()))
}

fn item_line(item: &CatalogItem) -> String {
    let mut line = format!(
        "{} [{}] {} released {}",
        item.name,
        item.primary_genre(),
        format_rating(item.rating),
        format_release(item.released)
    );
    if let Some(critic) = critic_label(item.metacritic) {
        line.push_str(&format!(" metacritic {}", critic));
    }
    line
}

/// Status line for non-ready phases
fn phase_line<V>(snapshot: &ViewSnapshot<V>) -> Option<String> {
    match snapshot.phase {
        Phase::Idle => Some("Nothing to show".to_string()),
        Phase::Loading => Some("Loading...".to_string()),
        Phase::Failed => Some(
            snapshot
                .error
                .clone()
                .unwrap_or_else(|| "Request failed".to_string()),
        ),
        Phase::Ready => None,
    }
}

/// Render a list view: the first item is featured, the rest follow
pub fn render_list(title: &str, snapshot: &ViewSnapshot<Vec<CatalogItem>>) -> String {
    let mut lines = vec![title.to_string(), "=".repeat(title.chars().count())];

    if let Some(status) = phase_line(snapshot) {
        lines.push(status);
        return lines.join("\n");
    }

    let items = snapshot.value.as_deref().unwrap_or_default();
    match items.split_first() {
        None => lines.push("No games found".to_string()),
        Some((featured, rest)) => {
            lines.push(format!("Featured: {}", item_line(featured)));
            if let Some(image) = &featured.background_image {
                lines.push(format!("  {}", image));
            }
            for (index, item) in rest.iter().enumerate() {
                lines.push(format!("{:>3}. {}", index + 2, item_line(item)));
            }
        }
    }

    lines.join("\n")
}

fn review_lines(review: &SynthesizedReview) -> Vec<String> {
    let mut lines = vec![format!(
        "- {} ({}){}",
        review.user.username,
        format_rating(review.rating),
        review
            .created
            .as_deref()
            .map(|ts| format!(" on {}", ts))
            .unwrap_or_default()
    )];
    lines.push(format!("  {}", review.text));
    if let Some(helpful) = helpful_label(review.likes) {
        lines.push(format!("  {}", helpful));
    }
    lines
}

/// Render the detail view
pub fn render_detail(snapshot: &ViewSnapshot<GameDetailBundle>, show_all_screenshots: bool) -> String {
    if let Some(status) = phase_line(snapshot) {
        return status;
    }
    let Some(bundle) = snapshot.value.as_ref() else {
        return "Nothing to show".to_string();
    };

    let item = &bundle.game.item;
    let mut lines = vec![item.name.clone(), "=".repeat(item.name.chars().count())];

    lines.push(format!("Released: {}", format_release(item.released)));
    lines.push(format!(
        "Rating: {} from {} ratings",
        format_rating(item.rating),
        item.ratings_count
    ));
    if let Some(critic) = critic_label(item.metacritic) {
        lines.push(format!("Metacritic: {}", critic));
    }
    for (label, names) in [
        ("Genres", item.genre_names()),
        ("Platforms", item.platform_names()),
        ("Developers", item.developer_names()),
        ("Publishers", item.publisher_names()),
    ] {
        if !names.is_empty() {
            lines.push(format!("{}: {}", label, names.join(", ")));
        }
    }
    if let Some(website) = &bundle.game.website {
        if !website.is_empty() {
            lines.push(format!("Website: {}", website));
        }
    }
    if let Some(description) = &bundle.game.description_raw {
        lines.push(String::new());
        lines.push(description.clone());
    }

    lines.push(String::new());
    lines.push(format!("Screenshots ({})", bundle.screenshots.len()));
    for shot in bundle.visible_screenshots(show_all_screenshots) {
        lines.push(format!("  {}", shot.image));
    }
    if !show_all_screenshots && bundle.has_more_screenshots() {
        lines.push("  ... use --all-screenshots to see the rest".to_string());
    }

    lines.push(String::new());
    lines.push(format!("Reviews ({})", bundle.reviews.len()));
    if bundle.reviews.is_empty() {
        lines.push("  No reviews yet".to_string());
    }
    for review in &bundle.reviews {
        lines.extend(review_lines(review));
    }

    lines.join("\n")
}
