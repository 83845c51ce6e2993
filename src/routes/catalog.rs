//! Catalog routes: products, categories and product insights.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, ALL_CATEGORIES, PRODUCTS, Product};
use crate::services::insight;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub product_id: &'static str,
    pub insight: Option<String>,
}

/// `GET /api/catalog?category=` — products in a category, catalog order.
pub async fn list_products(Query(query): Query<CatalogQuery>) -> Json<Vec<&'static Product>> {
    let category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    Json(catalog::filtered_products(PRODUCTS, category))
}

/// `GET /api/categories` — filter buttons, "All" first.
pub async fn list_categories() -> Json<Vec<&'static str>> {
    Json(catalog::categories(PRODUCTS))
}

/// `GET /api/products/:id/insight` — marketing hook for one product card.
pub async fn product_insight(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<InsightResponse>, StatusCode> {
    let product = catalog::find(PRODUCTS, &product_id).ok_or(StatusCode::NOT_FOUND)?;
    let insight = insight::product_insight(&state, product).await;
    Ok(Json(InsightResponse { product_id: product.id, insight }))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
