//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the span and Sentry scope)
//! 4. Session layer (tower-sessions, in-memory store)
//!
//! The [`CurrentShopper`] extractor sits on top of the session and resolves
//! the visitor's widget state.

pub mod request_id;
pub mod session;
pub mod visitor;

pub use request_id::request_id_middleware;
pub use session::create_session_layer;
pub use visitor::{CurrentShopper, start_visit};
