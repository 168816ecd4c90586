//! HTTP API handlers for gamewire-catalog

pub mod facets;
pub mod health;
pub mod views;

pub use facets::facet_routes;
pub use health::health_routes;
pub use views::view_routes;
