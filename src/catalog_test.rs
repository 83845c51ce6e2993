use super::*;

// =============================================================================
// Price
// =============================================================================

#[test]
fn price_display_has_two_decimals() {
    assert_eq!(Price::from_dollars(4697).to_string(), "$4697.00");
    assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
    assert_eq!(Price::from_cents(5).to_string(), "$0.05");
}

#[test]
fn price_serializes_as_dollars() {
    let json = serde_json::to_value(Price::from_cents(189_950)).unwrap();
    assert_eq!(json, serde_json::json!(1899.5));
}

#[test]
fn price_sum_and_times() {
    let total: Price = [Price::from_dollars(1899).times(2), Price::from_dollars(899)]
        .into_iter()
        .sum();
    assert_eq!(total, Price::from_dollars(4697));
}

// =============================================================================
// Product
// =============================================================================

#[test]
fn sale_prices_are_below_base_prices() {
    for product in PRODUCTS {
        if let Some(sale) = product.sale_price {
            assert!(sale < product.price, "{} sale price not below base", product.id);
        }
    }
}

#[test]
fn product_ids_are_unique() {
    for (i, a) in PRODUCTS.iter().enumerate() {
        assert!(PRODUCTS[i + 1..].iter().all(|b| b.id != a.id), "duplicate id {}", a.id);
    }
}

#[test]
fn effective_price_prefers_sale() {
    let sofa = find(PRODUCTS, "1").unwrap();
    assert_eq!(sofa.effective_price(), Price::from_dollars(1899));
    let table = find(PRODUCTS, "3").unwrap();
    assert_eq!(table.effective_price(), Price::from_dollars(899));
}

#[test]
fn discount_percent_rounds() {
    // (2400 - 1899) / 2400 = 20.875%
    assert_eq!(find(PRODUCTS, "1").unwrap().discount_percent(), Some(21));
    // (1200 - 850) / 1200 = 29.17%
    assert_eq!(find(PRODUCTS, "2").unwrap().discount_percent(), Some(29));
    assert_eq!(find(PRODUCTS, "3").unwrap().discount_percent(), None);
}

#[test]
fn black_friday_badge_follows_tag() {
    assert!(find(PRODUCTS, "1").unwrap().is_black_friday_deal());
    assert!(find(PRODUCTS, "6").unwrap().is_black_friday_deal());
    assert!(!find(PRODUCTS, "2").unwrap().is_black_friday_deal());
}

#[test]
fn find_unknown_is_none() {
    assert!(find(PRODUCTS, "99").is_none());
}

// =============================================================================
// categories / filtered_products
// =============================================================================

#[test]
fn categories_all_first_then_first_seen_order() {
    assert_eq!(categories(PRODUCTS), vec!["All", "Living Room", "Chairs", "Dining", "Lighting"]);
}

#[test]
fn categories_of_empty_catalog_is_only_all() {
    assert_eq!(categories(&[]), vec![ALL_CATEGORIES]);
}

#[test]
fn filter_all_returns_full_catalog_in_order() {
    let ids: Vec<&str> = filtered_products(PRODUCTS, "All").iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn filter_chairs_preserves_relative_order() {
    let ids: Vec<&str> = filtered_products(PRODUCTS, "Chairs").iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["2", "5"]);
}

#[test]
fn filter_unknown_category_is_empty() {
    assert!(filtered_products(PRODUCTS, "Garden").is_empty());
    assert!(!is_known_category(PRODUCTS, "Garden"));
    assert!(is_known_category(PRODUCTS, "All"));
    assert!(is_known_category(PRODUCTS, "Dining"));
}
