//! Product catalog: listing, text search and sample data

pub mod api;
pub mod seed;
pub mod service;

pub use api::catalog_api_router;
pub use seed::sample_products;
pub use service::{CatalogError, CatalogService};
