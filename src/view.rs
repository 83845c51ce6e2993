//! Presentation layer — the storefront page as a serializable view model.
//!
//! `render` is a pure function of one visitor's state, the catalog and the
//! insight memo. It never triggers model calls: a card whose insight has not
//! been generated yet simply renders without one.

use serde::Serialize;

use crate::catalog::{self, PRODUCTS, Price, Product};
use crate::chat::ChatMessage;
use crate::services::insight::InsightCache;
use crate::state::VisitorState;

#[derive(Debug, Serialize)]
pub struct StorefrontView {
    pub cart_count: u32,
    pub categories: Vec<CategoryButton>,
    pub products: Vec<ProductCard>,
    pub cart: CartDrawer,
    pub chat: ChatPanel,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CategoryButton {
    pub name: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct ProductCard {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub image: &'static str,
    pub price: Price,
    pub sale_price: Option<Price>,
    pub discount_percent: Option<u64>,
    pub black_friday: bool,
    pub insight: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CartLine {
    pub product_id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub image: &'static str,
    pub unit_price: Price,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct CartDrawer {
    pub open: bool,
    /// Drives the "your cart is empty" placeholder.
    pub empty: bool,
    pub lines: Vec<CartLine>,
    pub subtotal: Price,
    /// Subtotal formatted for display, e.g. `$4697.00`.
    pub subtotal_display: String,
}

#[derive(Debug, Serialize)]
pub struct ChatPanel {
    pub open: bool,
    pub typing: bool,
    pub messages: Vec<ChatMessage>,
}

fn product_card(product: &Product, insights: &InsightCache) -> ProductCard {
    ProductCard {
        id: product.id,
        name: product.name,
        category: product.category,
        image: product.image,
        price: product.price,
        sale_price: product.sale_price,
        discount_percent: product.discount_percent(),
        black_friday: product.is_black_friday_deal(),
        insight: insights
            .get(product.id)
            .and_then(|entry| entry.text().map(str::to_string)),
    }
}

#[must_use]
pub fn render(visitor: &VisitorState, insights: &InsightCache) -> StorefrontView {
    let categories = catalog::categories(PRODUCTS)
        .into_iter()
        .map(|name| CategoryButton { name, active: name == visitor.active_category })
        .collect();

    let products = catalog::filtered_products(PRODUCTS, &visitor.active_category)
        .into_iter()
        .map(|p| product_card(p, insights))
        .collect();

    let lines = visitor
        .cart
        .items()
        .iter()
        .map(|item| CartLine {
            product_id: item.product.id,
            name: item.product.name,
            category: item.product.category,
            image: item.product.image,
            unit_price: item.product.effective_price(),
            quantity: item.quantity,
        })
        .collect();
    let subtotal = visitor.cart.total();

    StorefrontView {
        cart_count: visitor.cart.count(),
        categories,
        products,
        cart: CartDrawer { open: visitor.cart_open, empty: visitor.cart.is_empty(), lines, subtotal, subtotal_display: subtotal.to_string() },
        chat: ChatPanel {
            open: visitor.chat_open,
            typing: visitor.is_typing(),
            messages: visitor.transcript.messages().to_vec(),
        },
    }
}
