//! Visitor identity and state extractors.
//!
//! The session stores a single visitor id. Handlers receive the visitor's
//! [`Shopper`](crate::shoppers::Shopper) through [`CurrentShopper`], or start
//! a fresh one on page load through [`start_visit`].

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::shoppers::ShopperHandle;
use crate::state::AppState;

/// Session keys for visitor data.
pub mod keys {
    /// Key for the visitor id that indexes the shopper store.
    pub const VISITOR_ID: &str = "visitor_id";
}

/// Extractor for the current visitor's widget state.
///
/// Visitors without a session, or whose state has expired, get an empty
/// shopper: nothing to add to the cart until the page is loaded again.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentShopper(shopper): CurrentShopper) -> impl IntoResponse {
///     let shopper = shopper.lock().await;
///     format!("{} lines in cart", shopper.cart.len())
/// }
/// ```
pub struct CurrentShopper(pub ShopperHandle);

impl FromRequestParts<AppState> for CurrentShopper {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;
        let visitor = visitor_id(&session).await?;

        Ok(Self(state.shoppers().get_or_start(visitor).await))
    }
}

/// Begin a new widget instance for the visitor behind `session`.
///
/// Any cart or catalog from an earlier page load is discarded.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn start_visit(session: &Session, state: &AppState) -> Result<ShopperHandle, AppError> {
    let visitor = visitor_id(session).await?;
    tracing::debug!(%visitor, "Starting fresh widget state");
    Ok(state.shoppers().start(visitor).await)
}

fn session_from_parts(parts: &Parts) -> Result<Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session layer missing".to_string()))
}

/// Read the visitor id from the session, minting one if absent.
async fn visitor_id(session: &Session) -> Result<Uuid, AppError> {
    if let Some(id) = session.get::<Uuid>(keys::VISITOR_ID).await? {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    session.insert(keys::VISITOR_ID, id).await?;
    Ok(id)
}
