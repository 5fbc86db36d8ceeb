//! Per-visitor widget state.
//!
//! Each visitor owns one [`Shopper`]: the categories and plants last fetched
//! for them, their active category and their cart. Shoppers live only in
//! memory, keyed by the visitor id stored in the session, and are dropped
//! after the configured idle time. A page load always starts a fresh one.

use std::sync::Arc;
use std::time::Duration;

use green_earth_core::{Cart, Catalog, Category};
use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Upper bound on concurrently tracked visitors.
const MAX_SHOPPERS: u64 = 10_000;

/// Outcome of the most recent plant fetch, as far as the grid is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStatus {
    /// No plant fetch has completed yet.
    #[default]
    NotLoaded,
    /// The catalog holds the latest fetch.
    Loaded,
    /// The latest fetch failed.
    Failed,
}

/// One visitor's widget state.
#[derive(Debug, Default)]
pub struct Shopper {
    /// Categories from the page-load fetch; `None` when that fetch failed.
    pub categories: Option<Vec<Category>>,
    pub catalog: Catalog,
    pub cart: Cart,
    pub grid: GridStatus,
}

/// Shared handle to a visitor's state.
///
/// Never hold the lock across a catalog request.
pub type ShopperHandle = Arc<Mutex<Shopper>>;

/// In-memory store of visitor state with idle expiry.
#[derive(Clone)]
pub struct ShopperStore {
    cache: Cache<Uuid, ShopperHandle>,
}

impl ShopperStore {
    /// Create a store that forgets visitors idle for longer than `idle`.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_SHOPPERS)
            .time_to_idle(idle)
            .build();
        Self { cache }
    }

    /// Replace whatever state `visitor` had with a fresh shopper.
    pub async fn start(&self, visitor: Uuid) -> ShopperHandle {
        let shopper = ShopperHandle::default();
        self.cache.insert(visitor, Arc::clone(&shopper)).await;
        shopper
    }

    /// State for `visitor`, creating an empty shopper if none is tracked.
    pub async fn get_or_start(&self, visitor: Uuid) -> ShopperHandle {
        self.cache.get_with(visitor, async { ShopperHandle::default() }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_start_returns_same_state() {
        let store = ShopperStore::new(Duration::from_secs(60));
        let visitor = Uuid::new_v4();

        let first = store.get_or_start(visitor).await;
        first.lock().await.grid = GridStatus::Loaded;

        let second = store.get_or_start(visitor).await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().await.grid, GridStatus::Loaded);
    }

    #[tokio::test]
    async fn test_start_resets_state() {
        let store = ShopperStore::new(Duration::from_secs(60));
        let visitor = Uuid::new_v4();

        store.get_or_start(visitor).await.lock().await.grid = GridStatus::Failed;
        let fresh = store.start(visitor).await;

        assert_eq!(fresh.lock().await.grid, GridStatus::NotLoaded);
        let again = store.get_or_start(visitor).await;
        assert!(Arc::ptr_eq(&fresh, &again));
    }
}
