//! Green Earth storefront library.
//!
//! A server-rendered plant storefront widget: category list, plant grid,
//! shopping cart, plant detail modal and donation form, driven by HTMX
//! fragments over a remote catalog API.
//!
//! The crate is a library so that integration tests can mount the same
//! router the binary serves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod shoppers;
pub mod state;

use axum::{Router, http::Request, middleware::from_fn};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Build the storefront router with its middleware stack.
///
/// Sentry layers are left to the caller so tests can run without a client.
pub fn router(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .fallback(routes::not_found)
        .layer(session_layer)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
