//! Cart operations through the HTTP surface.

#![allow(clippy::unwrap_used)]

use green_earth_integration_tests::{CatalogBehavior, TestStorefront, cart_total};

#[tokio::test]
async fn test_adding_same_plant_increments_quantity() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;
    store.load_page().await;

    store.add_to_cart("1").await;
    store.add_to_cart("1").await;
    let cart = store.add_to_cart("1").await;

    assert_eq!(cart.matches("class=\"cart-item\"").count(), 1);
    assert!(cart.contains("৳50 × 3"));
    assert_eq!(cart_total(&cart), Some("150"));
}

#[tokio::test]
async fn test_fractional_total_keeps_two_decimals() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;
    store.load_page().await;

    let cart = store.add_to_cart("2").await;
    assert_eq!(cart_total(&cart), Some("45.50"));

    let cart = store.add_to_cart("1").await;
    assert_eq!(cart_total(&cart), Some("95.50"));
    assert_eq!(cart.matches("class=\"cart-item\"").count(), 2);
}

#[tokio::test]
async fn test_unknown_ids_leave_cart_unchanged() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;
    store.load_page().await;
    let before = store.add_to_cart("1").await;

    assert_eq!(store.add_to_cart("99").await, before);
    assert_eq!(store.add_to_cart("not-a-number").await, before);
    assert_eq!(store.add_to_cart("").await, before);
}

#[tokio::test]
async fn test_remove_drops_whole_line() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;
    store.load_page().await;
    store.add_to_cart("1").await;
    store.add_to_cart("1").await;
    store.add_to_cart("2").await;

    let cart = store.remove_from_cart("1").await;

    assert!(!cart.contains("Mango Tree"));
    assert!(cart.contains("Gulmohar"));
    assert_eq!(cart_total(&cart), Some("45.50"));

    let cart = store.remove_from_cart("1").await;
    assert_eq!(cart_total(&cart), Some("45.50"));
}

#[tokio::test]
async fn test_cart_survives_category_change() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;
    store.load_page().await;
    store.add_to_cart("1").await;

    store.get("/categories/2/plants").await;

    // Plant 1 is no longer listed, so it cannot be added again.
    let cart = store.add_to_cart("1").await;
    assert!(cart.contains("৳50 × 1"));

    let cart = store.add_to_cart("2").await;
    assert_eq!(cart_total(&cart), Some("95.50"));

    // Removal works on lines regardless of the active category.
    let cart = store.remove_from_cart("1").await;
    assert_eq!(cart_total(&cart), Some("45.50"));
}

#[tokio::test]
async fn test_cart_without_page_load_is_empty() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;

    let cart = store.add_to_cart("1").await;

    assert_eq!(cart_total(&cart), Some("0"));
    assert!(!cart.contains("remove-item-btn"));
}
