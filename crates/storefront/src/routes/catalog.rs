//! Category list, plant grid and plant detail handlers.
//!
//! The view structs here are the render layer for catalog state: each is a
//! pure projection of a [`Shopper`] snapshot and is rebuilt in full on every
//! request.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use green_earth_core::{ActiveCategory, Catalog, Category, Plant, PlantId};
use tokio::sync::MutexGuard;
use tracing::{debug, instrument};

use crate::middleware::CurrentShopper;
use crate::shoppers::{GridStatus, Shopper, ShopperHandle};
use crate::state::AppState;

/// Label of the unfiltered entry at the top of the category list.
pub const ALL_CATEGORIES_LABEL: &str = "All Trees";

/// Grid message when a fetch returned no plants.
pub const NO_PLANTS_MESSAGE: &str = "No plants found for this category.";

/// Grid message when the plant fetch failed.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load plants.";

/// Placeholder for a missing category label.
const MISSING_LABEL: &str = "—";

// =============================================================================
// Views
// =============================================================================

/// Category list entry.
#[derive(Clone)]
pub struct CategoryItemView {
    pub id: String,
    pub name: String,
    pub active: bool,
    /// Selection URL with the id percent-encoded as a single path segment.
    pub path: String,
}

impl CategoryItemView {
    fn new(id: String, name: String, active: bool) -> Self {
        let path = format!("/categories/{}/plants", urlencoding::encode(&id));
        Self {
            id,
            name,
            active,
            path,
        }
    }
}

/// Build the category list: "All Trees" first, then every category.
///
/// Returns `None` when categories never loaded, leaving the list empty.
#[must_use]
pub fn category_items(
    categories: Option<&[Category]>,
    active: &ActiveCategory,
) -> Option<Vec<CategoryItemView>> {
    let categories = categories?;

    let all = CategoryItemView::new(
        ActiveCategory::ALL.to_string(),
        ALL_CATEGORIES_LABEL.to_string(),
        *active == ActiveCategory::All,
    );

    Some(
        std::iter::once(all)
            .chain(categories.iter().map(|category| {
                CategoryItemView::new(
                    category.id.to_string(),
                    category.name.clone(),
                    active.matches(&category.id),
                )
            }))
            .collect(),
    )
}

/// Plant card in the grid.
#[derive(Clone)]
pub struct PlantCardView {
    pub id: String,
    pub name: String,
    pub blurb: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
}

impl From<&Plant> for PlantCardView {
    fn from(plant: &Plant) -> Self {
        Self {
            id: plant.id.to_string(),
            name: plant.name.clone(),
            blurb: plant.card_blurb().to_string(),
            category: plant.card_category().unwrap_or(MISSING_LABEL).to_string(),
            price: plant.price.display_plain(),
            image_url: plant.image_url.clone(),
        }
    }
}

/// Plant grid contents: cards, or a message in their place.
#[derive(Clone)]
pub struct PlantGridView {
    pub cards: Vec<PlantCardView>,
    pub message: Option<&'static str>,
}

impl PlantGridView {
    /// Project the catalog according to the outcome of the last fetch.
    #[must_use]
    pub fn new(catalog: &Catalog, status: GridStatus) -> Self {
        match status {
            GridStatus::NotLoaded => Self {
                cards: Vec::new(),
                message: None,
            },
            GridStatus::Failed => Self {
                cards: Vec::new(),
                message: Some(LOAD_FAILED_MESSAGE),
            },
            GridStatus::Loaded if catalog.plants().is_empty() => Self {
                cards: Vec::new(),
                message: Some(NO_PLANTS_MESSAGE),
            },
            GridStatus::Loaded => Self {
                cards: catalog.plants().iter().map(PlantCardView::from).collect(),
                message: None,
            },
        }
    }
}

/// Plant detail panel contents.
#[derive(Clone)]
pub struct PlantDetailView {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
}

impl From<&Plant> for PlantDetailView {
    fn from(plant: &Plant) -> Self {
        Self {
            name: plant.name.clone(),
            description: plant
                .detail_description()
                .unwrap_or("No description available.")
                .to_string(),
            category: plant.detail_category().unwrap_or(MISSING_LABEL).to_string(),
            price: plant.price.display_plain(),
            image_url: plant.image_url.clone(),
        }
    }
}

/// Detail modal state. An open modal without a plant shows the not-found text.
#[derive(Clone)]
pub struct ModalView {
    pub open: bool,
    pub plant: Option<PlantDetailView>,
}

impl ModalView {
    /// Hidden modal.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            open: false,
            plant: None,
        }
    }

    /// Visible modal for `plant`, or for a lookup miss.
    #[must_use]
    pub fn open(plant: Option<&Plant>) -> Self {
        Self {
            open: true,
            plant: plant.map(PlantDetailView::from),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Plant grid plus out-of-band category list, returned on category selection.
#[derive(Template, WebTemplate)]
#[template(path = "partials/category_selection.html")]
pub struct CategorySelectionTemplate {
    pub grid: PlantGridView,
    pub categories: Option<Vec<CategoryItemView>>,
    pub category_list_oob: bool,
    pub currency: String,
}

impl CategorySelectionTemplate {
    /// Render the grid and category list for `shopper`.
    #[must_use]
    pub fn new(shopper: &Shopper, currency: String) -> Self {
        Self {
            grid: PlantGridView::new(&shopper.catalog, shopper.grid),
            categories: category_items(
                shopper.categories.as_deref(),
                shopper.catalog.active_category(),
            ),
            category_list_oob: true,
            currency,
        }
    }
}

/// Detail modal fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/plant_modal.html")]
pub struct PlantModalTemplate {
    pub modal: ModalView,
    pub currency: String,
}

// =============================================================================
// Fetch orchestration
// =============================================================================

/// Whether a plant fetch made it into the visitor's state.
pub enum PlantRefresh<'a> {
    /// The fetch was the latest one; grid status and catalog are updated.
    ///
    /// The guard is still held, so rendering from it cannot observe a newer
    /// selection.
    Applied(MutexGuard<'a, Shopper>),
    /// A newer selection started while this fetch was in flight.
    Superseded,
}

/// Select `category` for the visitor and fetch its plants.
///
/// The shopper lock is released while the request is in flight; a response
/// that arrives after a newer selection is discarded.
pub async fn refresh_plants<'a>(
    state: &AppState,
    shopper: &'a ShopperHandle,
    category: ActiveCategory,
) -> PlantRefresh<'a> {
    let ticket = shopper.lock().await.catalog.begin_fetch(category);
    let result = state.catalog().fetch_plants(ticket.category()).await;

    if let Err(e) = &result {
        tracing::error!(error = %e, category = %ticket.category(), "Plant load failed");
    }

    let mut guard = shopper.lock().await;
    if !guard.catalog.is_current(&ticket) {
        debug!(category = %ticket.category(), "Discarding superseded plant fetch");
        return PlantRefresh::Superseded;
    }

    let status = match result {
        Ok(plants) => {
            guard.catalog.complete_fetch(&ticket, plants);
            GridStatus::Loaded
        }
        Err(_) => GridStatus::Failed,
    };
    guard.grid = status;
    PlantRefresh::Applied(guard)
}

// =============================================================================
// Handlers
// =============================================================================

/// Select a category and re-render the grid (HTMX).
///
/// Responds `204 No Content` when a newer selection overtook this one, so the
/// page keeps showing the newer grid.
#[instrument(skip(state, shopper))]
pub async fn select_category(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Path(category): Path<String>,
) -> Response {
    let category = category.parse::<ActiveCategory>().unwrap_or_default();

    match refresh_plants(&state, &shopper, category).await {
        PlantRefresh::Superseded => StatusCode::NO_CONTENT.into_response(),
        PlantRefresh::Applied(guard) => {
            CategorySelectionTemplate::new(&guard, state.currency()).into_response()
        }
    }
}

/// Open the detail modal for a plant (HTMX).
#[instrument(skip(state, shopper))]
pub async fn plant_detail(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Path(plant_id): Path<String>,
) -> impl IntoResponse {
    let guard = shopper.lock().await;
    let plant = plant_id
        .parse::<PlantId>()
        .ok()
        .and_then(|id| guard.catalog.find_by_id(id).ok());

    if plant.is_none() {
        debug!(%plant_id, "No details for plant");
    }

    PlantModalTemplate {
        modal: ModalView::open(plant),
        currency: state.currency(),
    }
}

/// Hide the detail modal (HTMX).
pub async fn dismiss_detail(State(state): State<AppState>) -> impl IntoResponse {
    PlantModalTemplate {
        modal: ModalView::closed(),
        currency: state.currency(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use green_earth_core::{CategoryId, Price};

    use super::*;
    use crate::config::StorefrontConfig;

    fn plant(id: i32, name: &str) -> Plant {
        Plant {
            id: PlantId::new(id),
            name: name.to_string(),
            description: format!("{name} description"),
            small_description: String::new(),
            category: "Fruit Tree".to_string(),
            category_name: String::new(),
            price: Price::from_units(50),
            image_url: format!("https://img.example/{id}.png"),
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: CategoryId::new("1"),
                name: "Fruit Tree".to_string(),
            },
            Category {
                id: CategoryId::new("2"),
                name: "Flowering Tree".to_string(),
            },
        ]
    }

    fn loaded_shopper() -> Shopper {
        let mut shopper = Shopper {
            categories: Some(categories()),
            ..Shopper::default()
        };
        shopper
            .catalog
            .set_active_plants(vec![plant(1, "Mango"), plant(2, "Neem")]);
        shopper.grid = GridStatus::Loaded;
        shopper
    }

    #[test]
    fn test_category_items_mark_exactly_one_active() {
        let cats = categories();
        let items = category_items(
            Some(cats.as_slice()),
            &ActiveCategory::Category(CategoryId::new("2")),
        )
        .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, ALL_CATEGORIES_LABEL);
        assert_eq!(items[0].id, "all");
        let active: Vec<_> = items.iter().filter(|i| i.active).map(|i| i.id.as_str()).collect();
        assert_eq!(active, vec!["2"]);
    }

    #[test]
    fn test_category_items_all_active_by_default() {
        let cats = categories();
        let items = category_items(Some(cats.as_slice()), &ActiveCategory::All).unwrap();
        assert!(items[0].active);
        assert!(items[1..].iter().all(|i| !i.active));
    }

    #[test]
    fn test_category_item_paths_encode_reserved_characters() {
        let cats = vec![Category {
            id: CategoryId::new("a/b?c#d e"),
            name: "Odd".to_string(),
        }];
        let items = category_items(Some(cats.as_slice()), &ActiveCategory::All).unwrap();

        assert_eq!(items[0].path, "/categories/all/plants");
        assert_eq!(items[1].path, "/categories/a%2Fb%3Fc%23d%20e/plants");
        assert_eq!(items[1].id, "a/b?c#d e");
    }

    #[tokio::test]
    async fn test_applied_refresh_keeps_shopper_locked() {
        let config = StorefrontConfig::from_source(|key| {
            (key == "CATALOG_API_URL").then(|| "http://127.0.0.1:9/api".to_string())
        })
        .unwrap();
        let state = AppState::new(config);
        let shopper = ShopperHandle::default();
        let fruit = ActiveCategory::Category(CategoryId::new("1"));

        let PlantRefresh::Applied(guard) = refresh_plants(&state, &shopper, fruit.clone()).await
        else {
            panic!("only fetch in flight must apply");
        };

        assert_eq!(guard.grid, GridStatus::Failed);
        assert_eq!(guard.catalog.active_category(), &fruit);
        assert!(shopper.try_lock().is_err());
        drop(guard);
        assert!(shopper.try_lock().is_ok());
    }

    #[test]
    fn test_category_items_unpopulated_without_categories() {
        assert!(category_items(None, &ActiveCategory::All).is_none());
    }

    #[test]
    fn test_grid_states() {
        let mut catalog = Catalog::new();
        assert!(PlantGridView::new(&catalog, GridStatus::NotLoaded).message.is_none());
        assert_eq!(
            PlantGridView::new(&catalog, GridStatus::Failed).message,
            Some(LOAD_FAILED_MESSAGE)
        );
        assert_eq!(
            PlantGridView::new(&catalog, GridStatus::Loaded).message,
            Some(NO_PLANTS_MESSAGE)
        );

        catalog.set_active_plants(vec![plant(1, "Mango")]);
        let grid = PlantGridView::new(&catalog, GridStatus::Loaded);
        assert!(grid.message.is_none());
        assert_eq!(grid.cards.len(), 1);
        assert_eq!(grid.cards[0].price, "50");
        assert_eq!(grid.cards[0].category, "Fruit Tree");
    }

    #[test]
    fn test_card_category_placeholder() {
        let mut p = plant(1, "Mango");
        p.category = String::new();
        assert_eq!(PlantCardView::from(&p).category, "—");
    }

    #[test]
    fn test_detail_view_fallbacks() {
        let mut p = plant(1, "Mango");
        p.description = String::new();
        let detail = PlantDetailView::from(&p);
        assert_eq!(detail.description, "No description available.");
        assert_eq!(detail.category, "Fruit Tree");
    }

    #[test]
    fn test_category_selection_render_is_idempotent() {
        let shopper = loaded_shopper();

        let first = CategorySelectionTemplate::new(&shopper, "৳".to_string())
            .render()
            .unwrap();
        let second = CategorySelectionTemplate::new(&shopper, "৳".to_string())
            .render()
            .unwrap();

        assert_eq!(first, second);
        assert!(first.contains("Mango"));
        assert!(first.contains("Neem"));
        assert!(first.contains("hx-swap-oob"));
        assert_eq!(first.matches("add-to-cart-btn").count(), 2);
    }

    #[test]
    fn test_failed_grid_render() {
        let mut shopper = loaded_shopper();
        shopper.grid = GridStatus::Failed;

        let html = CategorySelectionTemplate::new(&shopper, "৳".to_string())
            .render()
            .unwrap();
        assert!(html.contains(LOAD_FAILED_MESSAGE));
        assert!(!html.contains("add-to-cart-btn"));
    }

    #[test]
    fn test_modal_render() {
        let p = plant(1, "Mango");

        let open = PlantModalTemplate {
            modal: ModalView::open(Some(&p)),
            currency: "৳".to_string(),
        }
        .render()
        .unwrap();
        assert!(open.contains("Mango description"));
        assert!(open.contains("৳50"));

        let missing = PlantModalTemplate {
            modal: ModalView::open(None),
            currency: "৳".to_string(),
        }
        .render()
        .unwrap();
        assert!(missing.contains("Sorry, no details found for this tree."));

        let closed = PlantModalTemplate {
            modal: ModalView::closed(),
            currency: "৳".to_string(),
        }
        .render()
        .unwrap();
        assert!(!closed.contains("modal-content"));
        assert!(closed.contains("id=\"plant-modal\""));
    }

    #[test]
    fn test_markup_is_escaped() {
        let mut shopper = loaded_shopper();
        shopper
            .catalog
            .set_active_plants(vec![plant(3, "<script>alert(1)</script>")]);

        let html = CategorySelectionTemplate::new(&shopper, "৳".to_string())
            .render()
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
