//! Catalog API endpoints
//!
//! Public, no token required:
//! - GET /api/products - Full catalog
//! - GET /api/products/search?q= - Case-insensitive text search

use axum::{
    Json, Router,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::core::auth::api::ApiError;
use crate::core::catalog::service::{CatalogError, CatalogService};
use crate::core::db::models::Product;

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        tracing::error!("Catalog request failed: {}", self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new("Internal server error", "INTERNAL_ERROR")),
        )
            .into_response()
    }
}

/// Query string for the search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Create the catalog API router
pub fn catalog_api_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    CatalogService: FromRef<S>,
{
    Router::new()
        .route("/api/products", get(list_handler))
        .route("/api/products/search", get(search_handler))
}

/// GET /api/products
async fn list_handler(
    State(catalog): State<CatalogService>,
) -> Result<Json<Vec<Product>>, CatalogError> {
    Ok(Json(catalog.list().await?))
}

/// GET /api/products/search?q=
async fn search_handler(
    State(catalog): State<CatalogService>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, CatalogError> {
    tracing::debug!("Product search: {:?}", params.q);

    Ok(Json(catalog.search(&params.q).await?))
}
