//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Storefront page (starts a fresh widget)
//! GET  /health                    - Health check
//!
//! # Catalog (HTMX fragments)
//! GET  /categories/:id/plants     - Plant grid + out-of-band category list
//! GET  /plants/:id/detail         - Detail modal, open
//! GET  /plants/detail/dismiss     - Detail modal, closed
//!
//! # Cart (HTMX fragments)
//! POST /cart/add                  - Add one unit (returns cart panel)
//! POST /cart/remove               - Remove a line (returns cart panel)
//!
//! # Donations
//! POST /donations                 - Acknowledge and clear the form
//! ```

pub mod cart;
pub mod catalog;
pub mod donations;
pub mod home;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the plant routes router.
pub fn plant_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/detail", get(catalog::plant_detail))
        .route("/detail/dismiss", get(catalog::dismiss_detail))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/categories/{id}/plants", get(catalog::select_category))
        .nest("/plants", plant_routes())
        .nest("/cart", cart_routes())
        .route("/donations", post(donations::submit))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. The catalog API is not probed.
pub async fn health() -> &'static str {
    "ok"
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
