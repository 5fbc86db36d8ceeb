//! Cart route handlers.
//!
//! Cart operations use HTMX: every mutation answers with the re-rendered
//! cart panel. Ids that do not parse or are not in the visitor's catalog are
//! ignored and the unchanged cart is rendered.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use green_earth_core::{Cart, CartLine, PlantId};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::middleware::CurrentShopper;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub plant_id: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            plant_id: line.plant_id.to_string(),
            name: line.name.clone(),
            unit_price: line.unit_price.display_plain(),
            quantity: line.quantity,
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().display_total(),
        }
    }
}

/// Add/remove form data.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    #[serde(default)]
    pub plant_id: String,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart.html")]
pub struct CartTemplate {
    pub cart: CartView,
    pub currency: String,
}

/// Add one unit of a plant to the cart (HTMX).
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Form(form): Form<CartForm>,
) -> impl IntoResponse {
    let mut guard = shopper.lock().await;
    let shopper = &mut *guard;

    match form.plant_id.parse::<PlantId>() {
        Ok(id) => match shopper.cart.add(&shopper.catalog, id) {
            Ok(line) => debug!(plant_id = %id, quantity = line.quantity, "Added to cart"),
            Err(miss) => debug!(%miss, "Ignoring add for plant outside catalog"),
        },
        Err(_) => debug!(plant_id = %form.plant_id, "Ignoring add with malformed plant id"),
    }

    CartTemplate {
        cart: CartView::from(&shopper.cart),
        currency: state.currency(),
    }
}

/// Remove a plant's line from the cart (HTMX).
#[instrument(skip(state, shopper))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Form(form): Form<CartForm>,
) -> impl IntoResponse {
    let mut guard = shopper.lock().await;

    if let Ok(id) = form.plant_id.parse::<PlantId>()
        && let Some(line) = guard.cart.remove(id)
    {
        debug!(plant_id = %id, quantity = line.quantity, "Removed from cart");
    }

    CartTemplate {
        cart: CartView::from(&guard.cart),
        currency: state.currency(),
    }
}
