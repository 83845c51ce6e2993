//! Visitor routes: page snapshot, view flags, cart and chat.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::store_error_to_status;
use crate::cart::Cart;
use crate::chat::ChatMessage;
use crate::services::assistant;
use crate::services::storefront::{self, ViewUpdate};
use crate::state::AppState;
use crate::view::{self, StorefrontView};

#[derive(Debug, Serialize)]
pub struct CreateVisitorResponse {
    pub visitor_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    #[serde(flatten)]
    pub cart: Cart,
    pub count: u32,
    pub total: crate::catalog::Price,
}

#[derive(Debug, Deserialize)]
pub struct AddCartItemBody {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SendChatBody {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub typing: bool,
    pub messages: Vec<ChatMessage>,
}

/// `POST /api/visitors` — start a new storefront session.
pub async fn create_visitor(State(state): State<AppState>) -> (StatusCode, Json<CreateVisitorResponse>) {
    let visitor_id = storefront::create_visitor(&state).await;
    (StatusCode::CREATED, Json(CreateVisitorResponse { visitor_id }))
}

/// `GET /api/visitors/:id` — the whole page as a view model.
pub async fn get_storefront(
    State(state): State<AppState>,
    Path(visitor_id): Path<Uuid>,
) -> Result<Json<StorefrontView>, StatusCode> {
    let visitors = state.visitors.read().await;
    let visitor = visitors.get(&visitor_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(view::render(visitor, &state.insights)))
}

/// `PATCH /api/visitors/:id/view` — category filter, cart drawer, chat panel.
pub async fn update_view(
    State(state): State<AppState>,
    Path(visitor_id): Path<Uuid>,
    Json(body): Json<ViewUpdate>,
) -> Result<StatusCode, StatusCode> {
    storefront::update_view(&state, visitor_id, body)
        .await
        .map_err(store_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/visitors/:id/cart` — cart lines with count and total.
pub async fn get_cart(
    State(state): State<AppState>,
    Path(visitor_id): Path<Uuid>,
) -> Result<Json<CartResponse>, StatusCode> {
    let cart = storefront::with_visitor(&state, visitor_id, |visitor| Ok(visitor.cart.clone()))
        .await
        .map_err(store_error_to_status)?;
    Ok(Json(cart_response(cart)))
}

/// `POST /api/visitors/:id/cart/items` — add one unit of a product.
pub async fn add_cart_item(
    State(state): State<AppState>,
    Path(visitor_id): Path<Uuid>,
    Json(body): Json<AddCartItemBody>,
) -> Result<Json<CartResponse>, StatusCode> {
    storefront::add_to_cart(&state, visitor_id, &body.product_id)
        .await
        .map_err(store_error_to_status)?;
    get_cart(State(state), Path(visitor_id)).await
}

/// `DELETE /api/visitors/:id/cart/items/:product_id` — drop a whole line.
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path((visitor_id, product_id)): Path<(Uuid, String)>,
) -> Result<Json<CartResponse>, StatusCode> {
    storefront::remove_from_cart(&state, visitor_id, &product_id)
        .await
        .map_err(store_error_to_status)?;
    get_cart(State(state), Path(visitor_id)).await
}

/// `GET /api/visitors/:id/chat` — transcript and typing indicator.
pub async fn get_chat(
    State(state): State<AppState>,
    Path(visitor_id): Path<Uuid>,
) -> Result<Json<ChatResponse>, StatusCode> {
    let chat = storefront::with_visitor(&state, visitor_id, |visitor| {
        Ok(ChatResponse { typing: visitor.is_typing(), messages: visitor.transcript.messages().to_vec() })
    })
    .await
    .map_err(store_error_to_status)?;
    Ok(Json(chat))
}

/// `POST /api/visitors/:id/chat` — send a message and wait for the reply.
///
/// Blank messages are ignored and answered with the unchanged transcript.
pub async fn send_chat(
    State(state): State<AppState>,
    Path(visitor_id): Path<Uuid>,
    Json(body): Json<SendChatBody>,
) -> Result<Json<ChatResponse>, StatusCode> {
    assistant::chat_turn(&state, visitor_id, &body.text)
        .await
        .map_err(store_error_to_status)?;
    get_chat(State(state), Path(visitor_id)).await
}

fn cart_response(cart: Cart) -> CartResponse {
    let count = cart.count();
    let total = cart.total();
    CartResponse { cart, count, total }
}

#[cfg(test)]
#[path = "visitors_test.rs"]
mod tests;
