//! Catalog service

use std::sync::Arc;

use crate::core::db::models::{NewProduct, Product};
use crate::core::db::store::{ProductStore, StoreError};

/// Catalog error types
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Product listing and text search
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// All products, ordered by name
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.list().await?)
    }

    /// Products whose name or description contains `query`, ignoring case.
    /// An empty query returns the full catalog.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        if query.is_empty() {
            return self.list().await;
        }

        Ok(self.store.search(query).await?)
    }

    /// Replace the catalog contents
    pub async fn seed(&self, products: Vec<NewProduct>) -> Result<usize, CatalogError> {
        let count = self.store.replace_all(products).await?;
        tracing::info!("Catalog seeded with {} products", count);
        Ok(count)
    }
}
