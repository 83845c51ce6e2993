//! Shopping cart — ordered line items keyed by product identifier.

use serde::Serialize;

use crate::catalog::{Price, Product};

/// A product in the cart with its quantity (always >= 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.effective_price().times(self.quantity)
    }
}

/// In-memory cart. Holds at most one item per product id, in the order the
/// products were first added.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, inserting a new line if needed.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity += 1,
            None => self.items.push(CartItem { product: *product, quantity: 1 }),
        }
    }

    /// Remove the whole line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != before
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
