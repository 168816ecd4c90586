//! # GameWire Common Library
//!
//! Shared code for the GameWire catalog front-end including:
//! - Catalog wire models (games, screenshots, rating buckets, discussion posts)
//! - Synthesized review records
//! - Query building for the upstream catalog API
//! - Configuration loading
//! - Platform name lookup and date helpers

pub mod config;
pub mod error;
pub mod models;
pub mod platforms;
pub mod query;
pub mod time;

pub use error::{Error, Result};
pub use query::CatalogQuery;
