//! The visitor's view of the catalog: last-fetched plants and the active category.
//!
//! Plant fetches are asynchronous and may overlap when a visitor switches
//! categories quickly. Each fetch takes a [`FetchTicket`] from
//! [`Catalog::begin_fetch`]; only the most recently issued ticket may replace
//! the plant collection, so a slow response for an abandoned category can
//! never overwrite a newer one.

use thiserror::Error;

use crate::types::{ActiveCategory, Plant, PlantId};

/// A plant id that is not part of the current catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no plant with id {0} in the current catalog")]
pub struct LookupMiss(pub PlantId);

/// Proof that a plant fetch was started, used to order overlapping fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    category: ActiveCategory,
}

impl FetchTicket {
    /// Category the fetch was started for.
    #[must_use]
    pub const fn category(&self) -> &ActiveCategory {
        &self.category
    }
}

/// Last-fetched plants plus the active category.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    plants: Vec<Plant>,
    active_category: ActiveCategory,
    generation: u64,
}

impl Catalog {
    /// Empty catalog with the unfiltered selection active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored plants wholesale.
    pub fn set_active_plants(&mut self, plants: Vec<Plant>) {
        self.plants = plants;
    }

    /// Plants in the order the catalog returned them.
    #[must_use]
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Look up a plant by id. Duplicate ids resolve to the last occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`LookupMiss`] if the last fetch did not return this id.
    pub fn find_by_id(&self, id: PlantId) -> Result<&Plant, LookupMiss> {
        self.plants
            .iter()
            .rev()
            .find(|plant| plant.id == id)
            .ok_or(LookupMiss(id))
    }

    /// Record the selected category. Fetching is the caller's job.
    pub fn set_active_category(&mut self, category: ActiveCategory) {
        self.active_category = category;
    }

    /// Currently selected category.
    #[must_use]
    pub const fn active_category(&self) -> &ActiveCategory {
        &self.active_category
    }

    /// Select `category` and issue the ticket for the fetch that follows.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self, category: ActiveCategory) -> FetchTicket {
        self.generation += 1;
        self.set_active_category(category.clone());
        FetchTicket {
            generation: self.generation,
            category,
        }
    }

    /// Whether `ticket` belongs to the most recent fetch.
    #[must_use]
    pub const fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply the result of a fetch if its ticket is still current.
    ///
    /// Returns `false` and leaves the catalog untouched for stale tickets.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, plants: Vec<Plant>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.set_active_plants(plants);
        true
    }
}
