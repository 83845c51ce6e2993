//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The storefront page talks to this service over JSON. Catalog routes are
//! shared by every visitor; visitor routes carry the visitor id in the path
//! and stand in for the page's click and keypress handlers.

pub mod catalog;
pub mod visitors;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::storefront::StoreError;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/catalog", get(catalog::list_products))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/products/{id}/insight", get(catalog::product_insight))
        .route("/api/visitors", post(visitors::create_visitor))
        .route("/api/visitors/{id}", get(visitors::get_storefront))
        .route("/api/visitors/{id}/view", patch(visitors::update_view))
        .route("/api/visitors/{id}/cart", get(visitors::get_cart))
        .route("/api/visitors/{id}/cart/items", post(visitors::add_cart_item))
        .route("/api/visitors/{id}/cart/items/{product_id}", delete(visitors::remove_cart_item))
        .route("/api/visitors/{id}/chat", get(visitors::get_chat).post(visitors::send_chat))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) fn store_error_to_status(err: StoreError) -> StatusCode {
    match err {
        StoreError::UnknownVisitor(_) | StoreError::UnknownProduct(_) => StatusCode::NOT_FOUND,
        StoreError::UnknownCategory(_) => StatusCode::BAD_REQUEST,
        StoreError::ReplyPending(_) => StatusCode::CONFLICT,
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
