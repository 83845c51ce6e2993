use super::*;
use crate::catalog::Price;
use crate::state::test_helpers;

#[tokio::test]
async fn create_visitor_registers_fresh_state() {
    let state = test_helpers::test_app_state();
    let a = create_visitor(&state).await;
    let b = create_visitor(&state).await;
    assert_ne!(a, b);

    let visitors = state.visitors.read().await;
    assert_eq!(visitors.len(), 2);
    assert!(visitors[&a].cart.is_empty());
}

#[tokio::test]
async fn add_to_cart_opens_drawer() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_visitor(&state).await;

    add_to_cart(&state, id, "1").await.unwrap();
    add_to_cart(&state, id, "1").await.unwrap();
    add_to_cart(&state, id, "3").await.unwrap();

    let visitors = state.visitors.read().await;
    let visitor = &visitors[&id];
    assert!(visitor.cart_open);
    assert_eq!(visitor.cart.count(), 3);
    assert_eq!(visitor.cart.total(), Price::from_dollars(4697));
}

#[tokio::test]
async fn add_unknown_product_is_rejected() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_visitor(&state).await;

    let err = add_to_cart(&state, id, "42").await.unwrap_err();
    assert_eq!(err, StoreError::UnknownProduct("42".into()));
    assert!(!state.visitors.read().await[&id].cart_open);
}

#[tokio::test]
async fn add_for_unknown_visitor_is_rejected() {
    let state = test_helpers::test_app_state();
    let ghost = Uuid::new_v4();
    assert_eq!(add_to_cart(&state, ghost, "1").await, Err(StoreError::UnknownVisitor(ghost)));
}

#[tokio::test]
async fn remove_absent_line_is_ok() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_visitor(&state).await;

    add_to_cart(&state, id, "2").await.unwrap();
    remove_from_cart(&state, id, "5").await.unwrap();
    remove_from_cart(&state, id, "2").await.unwrap();
    assert!(state.visitors.read().await[&id].cart.is_empty());
}

#[tokio::test]
async fn update_view_applies_present_fields_only() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_visitor(&state).await;

    let update = ViewUpdate { active_category: Some("Chairs".into()), chat_open: Some(true), ..ViewUpdate::default() };
    update_view(&state, id, update).await.unwrap();

    let visitors = state.visitors.read().await;
    let visitor = &visitors[&id];
    assert_eq!(visitor.active_category, "Chairs");
    assert!(visitor.chat_open);
    assert!(!visitor.cart_open);
}

#[tokio::test]
async fn update_view_rejects_unknown_category_without_partial_apply() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_visitor(&state).await;

    let update = ViewUpdate { active_category: Some("Garden".into()), cart_open: Some(true), chat_open: None };
    let err = update_view(&state, id, update).await.unwrap_err();
    assert_eq!(err, StoreError::UnknownCategory("Garden".into()));
    assert!(!state.visitors.read().await[&id].cart_open);
}
