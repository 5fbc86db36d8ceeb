//! Catalog API client implementation.

use std::sync::Arc;

use green_earth_core::{ActiveCategory, Category, Plant};
use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use super::conversions::{categories_from_payload, plants_from_payload};

/// Client for the remote plant catalog.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client for the catalog rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Base URL requests are built from.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build the URL for `segments` below the base URL.
    ///
    /// Segments are percent-encoded, so category ids can never escape the
    /// API path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the body as JSON.
    async fn get_json(&self, url: Url) -> Result<serde_json::Value, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status { status });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    /// List all plant categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoint(&["categories"])?;
        let payload = self.get_json(url).await?;

        let categories = categories_from_payload(&payload);
        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    /// List the plants of one category, or every plant for
    /// [`ActiveCategory::All`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self, category), fields(category = %category))]
    pub async fn fetch_plants(&self, category: &ActiveCategory) -> Result<Vec<Plant>, CatalogError> {
        let url = match category {
            ActiveCategory::All => self.endpoint(&["plants"])?,
            ActiveCategory::Category(id) => self.endpoint(&["category", id.as_str()])?,
        };
        let payload = self.get_json(url).await?;

        let plants = plants_from_payload(&payload);
        debug!(count = plants.len(), "Fetched plants");
        Ok(plants)
    }
}
