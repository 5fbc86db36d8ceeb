//! Home page route handler.
//!
//! Loading the page starts a fresh widget instance: categories are fetched,
//! then every plant, and the whole page is rendered from the new state.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use green_earth_core::ActiveCategory;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::start_visit;
use crate::routes::cart::CartView;
use crate::routes::catalog::{
    CategoryItemView, ModalView, PlantGridView, PlantRefresh, category_items, refresh_plants,
};
use crate::shoppers::Shopper;
use crate::state::AppState;

/// Full page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub categories: Option<Vec<CategoryItemView>>,
    pub category_list_oob: bool,
    pub grid: PlantGridView,
    pub cart: CartView,
    pub modal: ModalView,
    pub donation_acknowledged: bool,
    pub currency: String,
}

impl HomeTemplate {
    /// Render every panel from `shopper`, with the detail modal closed.
    #[must_use]
    pub fn new(shopper: &Shopper, currency: String) -> Self {
        Self {
            categories: category_items(
                shopper.categories.as_deref(),
                shopper.catalog.active_category(),
            ),
            category_list_oob: false,
            grid: PlantGridView::new(&shopper.catalog, shopper.grid),
            cart: CartView::from(&shopper.cart),
            modal: ModalView::closed(),
            donation_acknowledged: false,
            currency,
        }
    }
}

/// Display the storefront page.
///
/// A failed category fetch leaves the category list empty and skips the
/// plant fetch; the page still renders and stays usable.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let shopper = start_visit(&session, &state).await?;

    let refreshed = match state.catalog().fetch_categories().await {
        Ok(categories) => {
            shopper.lock().await.categories = Some(categories);
            match refresh_plants(&state, &shopper, ActiveCategory::All).await {
                PlantRefresh::Applied(guard) => Some(guard),
                PlantRefresh::Superseded => None,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Category load failed");
            None
        }
    };

    let guard = match refreshed {
        Some(guard) => guard,
        None => shopper.lock().await,
    };
    Ok(HomeTemplate::new(&guard, state.currency()))
}
