//! Visitor shopping cart.
//!
//! Lines keep insertion order and hold a snapshot of the plant's name and
//! price taken on the first add; later catalog fetches never rewrite them.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, LookupMiss};
use crate::types::{PlantId, Price};

/// One aggregated cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub plant_id: PlantId,
    pub name: String,
    pub unit_price: Price,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Ordered cart lines, at most one per plant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `plant_id`, looked up in `catalog`.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`LookupMiss`] and leaves the cart unchanged if the plant is
    /// not in the catalog.
    pub fn add(&mut self, catalog: &Catalog, plant_id: PlantId) -> Result<&CartLine, LookupMiss> {
        let plant = catalog.find_by_id(plant_id)?;

        let index = match self.lines.iter().position(|line| line.plant_id == plant_id) {
            Some(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = line.quantity.saturating_add(1);
                }
                index
            }
            None => {
                self.lines.push(CartLine {
                    plant_id,
                    name: plant.name.clone(),
                    unit_price: plant.price,
                    quantity: 1,
                });
                self.lines.len() - 1
            }
        };

        self.lines.get(index).ok_or(LookupMiss(plant_id))
    }

    /// Remove the line for `plant_id`, returning it if there was one.
    pub fn remove(&mut self, plant_id: PlantId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.plant_id == plant_id)?;
        Some(self.lines.remove(index))
    }

    /// Sum of `unit_price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for `plant_id`, if any.
    #[must_use]
    pub fn line(&self, plant_id: PlantId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.plant_id == plant_id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
