//! Product catalog and category filtering.
//!
//! DESIGN
//! ======
//! The catalog is a constant table built into the binary: no loading, no
//! mutation, no errors. Filtering is a pure function of the table and the
//! selected category, so every visitor shares the same `&'static` products.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Serialize, Serializer};

/// Synthetic category that selects every product.
pub const ALL_CATEGORIES: &str = "All";

/// Tag that earns a product the "Black Friday" badge.
pub const BLACK_FRIDAY_TAG: &str = "Black Friday Deal";

// =============================================================================
// PRICE
// =============================================================================

/// Money amount in cents. Serializes as a decimal number of dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Price(u64);

impl Price {
    #[must_use]
    pub const fn from_dollars(dollars: u64) -> Self {
        Self::from_cents(dollars * 100)
    }

    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0 * quantity as u64)
    }

    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

// =============================================================================
// PRODUCT
// =============================================================================

/// An immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Price,
    /// Discounted price; always below `price` when present.
    pub sale_price: Option<Price>,
    pub category: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

impl Product {
    /// Price the shopper actually pays.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.sale_price.unwrap_or(self.price)
    }

    /// Whole-percent discount shown on the card badge, rounded to nearest.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u64> {
        let sale = self.sale_price?;
        let price = self.price.cents();
        if price == 0 || sale.cents() >= price {
            return None;
        }
        let off = price - sale.cents();
        Some((off * 100 + price / 2) / price)
    }

    #[must_use]
    pub fn is_black_friday_deal(&self) -> bool {
        self.tags.contains(&BLACK_FRIDAY_TAG)
    }
}

// =============================================================================
// CATALOG TABLE
// =============================================================================

pub static PRODUCTS: &[Product] = &[
    Product {
        id: "1",
        name: "The Cloud Sofa",
        price: Price::from_dollars(2400),
        sale_price: Some(Price::from_dollars(1899)),
        category: "Living Room",
        image: "https://picsum.photos/id/1036/800/800",
        description: "Experience the sensation of floating with our plush, modular Cloud Sofa. Designed for ultimate relaxation.",
        tags: &["Best Seller", BLACK_FRIDAY_TAG],
    },
    Product {
        id: "2",
        name: "Eames-Style Lounge",
        price: Price::from_dollars(1200),
        sale_price: Some(Price::from_dollars(850)),
        category: "Chairs",
        image: "https://picsum.photos/id/1060/800/800",
        description: "Mid-century modern aesthetic meets ergonomic excellence. Premium leather finish.",
        tags: &["Classic", "Limited Stock"],
    },
    Product {
        id: "3",
        name: "Nordic Oak Dining Table",
        price: Price::from_dollars(899),
        sale_price: None,
        category: "Dining",
        image: "https://picsum.photos/id/1080/800/800",
        description: "Solid oak construction with a minimalist silhouette. Perfect for family gatherings.",
        tags: &["Sustainable"],
    },
    Product {
        id: "4",
        name: "Industrial Floor Lamp",
        price: Price::from_dollars(250),
        sale_price: Some(Price::from_dollars(199)),
        category: "Lighting",
        image: "https://picsum.photos/id/1035/800/800",
        description: "A statement piece that illuminates your space with a warm, ambient glow.",
        tags: &["Decor"],
    },
    Product {
        id: "5",
        name: "Velvet Accent Chair",
        price: Price::from_dollars(450),
        sale_price: None,
        category: "Chairs",
        image: "https://picsum.photos/id/1062/800/800",
        description: "Add a pop of color and texture with this luxurious velvet armchair.",
        tags: &["New Arrival"],
    },
    Product {
        id: "6",
        name: "Minimalist Coffee Table",
        price: Price::from_dollars(350),
        sale_price: Some(Price::from_dollars(275)),
        category: "Living Room",
        image: "https://picsum.photos/id/1078/800/800",
        description: "Sleek glass and metal design that maximizes visual space in smaller rooms.",
        tags: &[BLACK_FRIDAY_TAG],
    },
];

// =============================================================================
// QUERIES
// =============================================================================

/// Look up a product by identifier.
#[must_use]
pub fn find<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == id)
}

/// Distinct categories in first-seen order, with [`ALL_CATEGORIES`] first.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<&'static str> {
    let mut out = vec![ALL_CATEGORIES];
    for product in products {
        if !out.contains(&product.category) {
            out.push(product.category);
        }
    }
    out
}

/// Products in `active` category, catalog order preserved.
#[must_use]
pub fn filtered_products<'a>(products: &'a [Product], active: &str) -> Vec<&'a Product> {
    if active == ALL_CATEGORIES {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.category == active).collect()
}

/// Whether `category` is one a visitor may select.
#[must_use]
pub fn is_known_category(products: &[Product], category: &str) -> bool {
    category == ALL_CATEGORIES || products.iter().any(|p| p.category == category)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
