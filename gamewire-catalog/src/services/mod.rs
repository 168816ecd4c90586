//! Upstream catalog access and data shaping

pub mod catalog_source;
pub mod rawg_client;
pub mod review_synthesizer;

pub use catalog_source::CatalogSource;
pub use rawg_client::{RawgClient, RawgError, RawgResult};
pub use review_synthesizer::{reviews_or_empty, synthesize_reviews};
