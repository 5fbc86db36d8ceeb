//! Page load, health, donations and fallbacks.

#![allow(clippy::unwrap_used)]

use green_earth_integration_tests::{CatalogBehavior, TestStorefront, active_category, cart_total};
use reqwest::StatusCode;

#[tokio::test]
async fn test_health() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;

    let (status, body) = store.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_page_load_renders_categories_and_all_plants() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;

    let page = store.load_page().await;

    assert!(page.contains("All Trees"));
    assert!(page.contains("Fruit Tree"));
    assert!(page.contains("Flowering Tree"));
    assert!(page.contains("Medicinal Tree"));
    assert_eq!(active_category(&page), Some("all"));

    assert_eq!(page.matches("class=\"plant-card\"").count(), 3);
    assert!(page.contains("Mango Tree"));
    assert!(page.contains("<span>45.5</span>"));
    assert!(page.contains("<span>120</span>"));
    assert_eq!(cart_total(&page), Some("0"));
    assert!(!page.contains("modal-content"));
}

#[tokio::test]
async fn test_reload_starts_a_fresh_widget() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;
    store.load_page().await;
    store.add_to_cart("1").await;

    let page = store.load_page().await;

    assert_eq!(cart_total(&page), Some("0"));
    assert!(!page.contains("remove-item-btn"));
}

#[tokio::test]
async fn test_category_failure_leaves_list_empty_and_grid_unloaded() {
    let store = TestStorefront::start(CatalogBehavior::CategoriesFail).await;

    let page = store.load_page().await;

    assert!(page.contains("id=\"categories-list\""));
    assert!(!page.contains("All Trees"));
    assert!(!page.contains("class=\"plant-card\""));
    assert!(!page.contains("Could not load plants."));
}

#[tokio::test]
async fn test_plant_failure_shows_message() {
    let store = TestStorefront::start(CatalogBehavior::PlantsFail).await;

    let page = store.load_page().await;

    assert!(page.contains("All Trees"));
    assert!(page.contains("Could not load plants."));
    assert!(!page.contains("class=\"plant-card\""));
}

#[tokio::test]
async fn test_unreachable_catalog_still_renders_page() {
    let store = TestStorefront::start_with_catalog("http://127.0.0.1:9/api").await;

    let page = store.load_page().await;

    assert!(!page.contains("All Trees"));
    assert!(page.contains("id=\"donation-form\""));
}

#[tokio::test]
async fn test_donation_is_acknowledged() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;

    let (status, body) = store
        .post_form(
            "/donations",
            &[("name", "Rahim"), ("email", "rahim@example.com"), ("amount", "3")],
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Thank you for your donation! 💚"));
    assert!(!body.contains("rahim@example.com"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;

    let (status, _) = store.get("/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let store = TestStorefront::start(CatalogBehavior::Healthy).await;

    let response = store
        .client
        .get(format!("{}/health", store.base_url))
        .send()
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
