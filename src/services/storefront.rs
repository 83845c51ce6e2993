//! Storefront service — visitor lifecycle, cart actions and view flags.
//!
//! Every operation takes the visitor map lock for the duration of one
//! synchronous mutation; nothing here awaits anything but the lock.

use tracing::info;
use uuid::Uuid;

use crate::catalog::{self, PRODUCTS};
use crate::state::{AppState, VisitorState};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("visitor not found: {0}")]
    UnknownVisitor(Uuid),
    #[error("product not found: {0}")]
    UnknownProduct(String),
    #[error("category not found: {0}")]
    UnknownCategory(String),
    #[error("assistant reply still pending for visitor {0}")]
    ReplyPending(Uuid),
}

/// Partial update of a visitor's view flags. Absent fields are unchanged.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct ViewUpdate {
    pub active_category: Option<String>,
    pub cart_open: Option<bool>,
    pub chat_open: Option<bool>,
}

/// Register a new visitor and return its id.
pub async fn create_visitor(state: &AppState) -> Uuid {
    let visitor_id = Uuid::new_v4();
    let visitor = VisitorState::new(state.assistant_client());
    state.visitors.write().await.insert(visitor_id, visitor);
    info!(%visitor_id, "storefront: visitor created");
    visitor_id
}

/// Run `f` against a visitor's state under the write lock.
///
/// # Errors
///
/// [`StoreError::UnknownVisitor`] if the visitor does not exist.
pub async fn with_visitor<T>(
    state: &AppState,
    visitor_id: Uuid,
    f: impl FnOnce(&mut VisitorState) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let mut visitors = state.visitors.write().await;
    let visitor = visitors
        .get_mut(&visitor_id)
        .ok_or(StoreError::UnknownVisitor(visitor_id))?;
    f(visitor)
}

/// Add one unit of a product to the cart and open the cart drawer.
///
/// # Errors
///
/// [`StoreError::UnknownVisitor`] or [`StoreError::UnknownProduct`].
pub async fn add_to_cart(state: &AppState, visitor_id: Uuid, product_id: &str) -> Result<(), StoreError> {
    let product =
        catalog::find(PRODUCTS, product_id).ok_or_else(|| StoreError::UnknownProduct(product_id.to_string()))?;
    with_visitor(state, visitor_id, |visitor| {
        visitor.cart.add(product);
        visitor.cart_open = true;
        info!(%visitor_id, product_id, count = visitor.cart.count(), "storefront: added to cart");
        Ok(())
    })
    .await
}

/// Remove a product's line from the cart. Absent lines are ignored.
///
/// # Errors
///
/// [`StoreError::UnknownVisitor`] if the visitor does not exist.
pub async fn remove_from_cart(state: &AppState, visitor_id: Uuid, product_id: &str) -> Result<(), StoreError> {
    with_visitor(state, visitor_id, |visitor| {
        if visitor.cart.remove(product_id) {
            info!(%visitor_id, product_id, "storefront: removed from cart");
        }
        Ok(())
    })
    .await
}

/// Apply a [`ViewUpdate`]. The update is all-or-nothing.
///
/// # Errors
///
/// [`StoreError::UnknownVisitor`], or [`StoreError::UnknownCategory`] if the
/// requested category is neither "All" nor present in the catalog.
pub async fn update_view(state: &AppState, visitor_id: Uuid, update: ViewUpdate) -> Result<(), StoreError> {
    if let Some(category) = &update.active_category {
        if !catalog::is_known_category(PRODUCTS, category) {
            return Err(StoreError::UnknownCategory(category.clone()));
        }
    }
    with_visitor(state, visitor_id, |visitor| {
        if let Some(category) = update.active_category {
            visitor.active_category = category;
        }
        if let Some(open) = update.cart_open {
            visitor.cart_open = open;
        }
        if let Some(open) = update.chat_open {
            visitor.chat_open = open;
        }
        Ok(())
    })
    .await
}

#[cfg(test)]
#[path = "storefront_test.rs"]
mod tests;
