//! Shared integration test helpers

#![allow(dead_code)]

pub mod fake_upstream;
pub mod stub_catalog;

use gamewire_common::models::CatalogItem;

/// Game record with the fields the list filters look at
pub fn game(id: u64, name: &str, rating: f64, image: bool) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_string(),
        background_image: image.then(|| format!("https://img.example/{}.jpg", id)),
        rating,
        ratings_count: if rating > 0.0 { 12 } else { 0 },
        ..Default::default()
    }
}
