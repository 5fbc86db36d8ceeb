//! Integration test harness for the Green Earth storefront.
//!
//! Every test gets its own fake catalog API and its own storefront, both
//! bound to ephemeral ports on localhost. Nothing outside the process is
//! contacted.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p green-earth-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use green_earth_storefront::config::StorefrontConfig;
use green_earth_storefront::state::AppState;
use reqwest::Client;
use serde_json::{Value, json};

/// Category id whose plant listing the fake API answers slowly.
pub const SLOW_CATEGORY: &str = "3";

/// How long the fake API stalls on [`SLOW_CATEGORY`].
pub const SLOW_DELAY: Duration = Duration::from_millis(600);

/// How the fake catalog API behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogBehavior {
    /// Every endpoint answers normally.
    Healthy,
    /// Plant listings answer `500`; categories still load.
    PlantsFail,
    /// The category listing answers `500`.
    CategoriesFail,
}

/// Plants served by the fake API, in listing order.
#[must_use]
pub fn plants_fixture() -> Value {
    json!([
        {
            "id": 1,
            "image": "https://img.example/mango.png",
            "name": "Mango Tree",
            "description": "A fast-growing tropical tree producing delicious, juicy mangoes.",
            "category": "Fruit Tree",
            "price": 50
        },
        {
            "id": 2,
            "image": "https://img.example/gulmohar.png",
            "name": "Gulmohar",
            "description": "Known as the flame tree for its bright red flowers.",
            "category": "Flowering Tree",
            "price": 45.5
        },
        {
            "id": 3,
            "image": "",
            "name": "Neem Tree",
            "description": "",
            "category": "Medicinal Tree",
            "price": "120"
        }
    ])
}

fn category_name(id: &str) -> Option<&'static str> {
    match id {
        "1" => Some("Fruit Tree"),
        "2" => Some("Flowering Tree"),
        "3" => Some("Medicinal Tree"),
        _ => None,
    }
}

async fn categories(State(behavior): State<CatalogBehavior>) -> Response {
    if behavior == CatalogBehavior::CategoriesFail {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(json!({
        "status": true,
        "message": "all categories fetched",
        "categories": [
            { "id": 1, "category_name": "Fruit Tree", "small_description": "Trees that bear fruit" },
            { "id": 2, "category_name": "Flowering Tree" },
            { "id": 3, "category_name": "Medicinal Tree" }
        ]
    }))
    .into_response()
}

async fn plants(State(behavior): State<CatalogBehavior>) -> Response {
    if behavior == CatalogBehavior::PlantsFail {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(json!({ "status": true, "plants": plants_fixture() })).into_response()
}

/// Category listings use the `data` field, like the live API.
async fn plants_by_category(
    State(behavior): State<CatalogBehavior>,
    Path(id): Path<String>,
) -> Response {
    if behavior == CatalogBehavior::PlantsFail {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if id == SLOW_CATEGORY {
        tokio::time::sleep(SLOW_DELAY).await;
    }

    let wanted = category_name(&id);
    let data: Vec<Value> = plants_fixture()
        .as_array()
        .into_iter()
        .flatten()
        .filter(|plant| wanted.is_some() && plant["category"].as_str() == wanted)
        .cloned()
        .collect();

    Json(json!({ "status": true, "data": data })).into_response()
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a fake catalog API and return its base URL (ending in `/api`).
pub async fn spawn_catalog_api(behavior: CatalogBehavior) -> String {
    let api = Router::new()
        .route("/categories", get(categories))
        .route("/plants", get(plants))
        .route("/category/{id}", get(plants_by_category))
        .with_state(behavior);

    let addr = serve(Router::new().nest("/api", api)).await;
    format!("http://{addr}/api")
}

/// A running storefront plus a cookie-keeping client, i.e. one visitor.
pub struct TestStorefront {
    pub client: Client,
    pub base_url: String,
}

impl TestStorefront {
    /// Start a storefront against a fresh fake catalog API.
    pub async fn start(behavior: CatalogBehavior) -> Self {
        let catalog_url = spawn_catalog_api(behavior).await;
        Self::start_with_catalog(&catalog_url).await
    }

    /// Start a storefront against the catalog API at `catalog_url`.
    pub async fn start_with_catalog(catalog_url: &str) -> Self {
        let vars = HashMap::from([("CATALOG_API_URL", catalog_url.to_string())]);
        let config = StorefrontConfig::from_source(|key| vars.get(key).cloned()).unwrap();

        let addr = serve(green_earth_storefront::router(AppState::new(config))).await;

        Self {
            client: Client::builder().cookie_store(true).build().unwrap(),
            base_url: format!("http://{addr}"),
        }
    }

    /// GET `path` and return status and body.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }

    /// POST a form to `path` and return status and body.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> (reqwest::StatusCode, String) {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .form(form)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }

    /// Load the page, which starts a fresh widget for this visitor.
    pub async fn load_page(&self) -> String {
        let (status, body) = self.get("/").await;
        assert_eq!(status, reqwest::StatusCode::OK);
        body
    }

    /// Add one unit of `plant_id` and return the cart panel.
    pub async fn add_to_cart(&self, plant_id: &str) -> String {
        self.post_form("/cart/add", &[("plant_id", plant_id)]).await.1
    }

    /// Remove `plant_id`'s line and return the cart panel.
    pub async fn remove_from_cart(&self, plant_id: &str) -> String {
        self.post_form("/cart/remove", &[("plant_id", plant_id)]).await.1
    }
}

/// Extract the text of `<span id="total-price">` from a cart panel.
#[must_use]
pub fn cart_total(html: &str) -> Option<&str> {
    let start = html.find(r#"<span id="total-price">"#)? + r#"<span id="total-price">"#.len();
    let len = html.get(start..)?.find("</span>")?;
    html.get(start..start + len)
}

/// Id of the category list entry marked active, if any.
#[must_use]
pub fn active_category(html: &str) -> Option<&str> {
    let marker = html.find(r#"class="active""#)?;
    let rest = html.get(marker..)?;
    let start = rest.find("/categories/")? + "/categories/".len();
    let len = rest.get(start..)?.find("/plants")?;
    rest.get(start..start + len)
}
