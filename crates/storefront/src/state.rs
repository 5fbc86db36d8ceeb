//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::shoppers::ShopperStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog client, visitor state and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    shoppers: ShopperStore,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(config.catalog_api_url.clone());
        let shoppers = ShopperStore::new(config.session_idle);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                shoppers,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the visitor state store.
    #[must_use]
    pub fn shoppers(&self) -> &ShopperStore {
        &self.inner.shoppers
    }

    /// Currency symbol rendered before prices.
    #[must_use]
    pub fn currency(&self) -> String {
        self.inner.config.currency_symbol.clone()
    }
}
