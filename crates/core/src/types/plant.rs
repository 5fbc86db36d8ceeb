//! Catalog entities: plants, categories and the active category selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CategoryId, PlantId, Price};

/// A plant as offered by the catalog, already normalized at the API boundary.
///
/// Text fields that the catalog omits are empty strings, never `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    pub description: String,
    pub small_description: String,
    /// Category label as sent with the plant.
    pub category: String,
    /// Alternate category label some payloads use instead of `category`.
    pub category_name: String,
    pub price: Price,
    pub image_url: String,
}

impl Plant {
    /// Short blurb for cards: the small description, else the full one.
    #[must_use]
    pub fn card_blurb(&self) -> &str {
        first_non_empty(&[&self.small_description, &self.description]).unwrap_or("")
    }

    /// Category label for cards: `category_name`, else `category`.
    #[must_use]
    pub fn card_category(&self) -> Option<&str> {
        first_non_empty(&[&self.category_name, &self.category])
    }

    /// Full description for the detail panel: the description, else the small one.
    #[must_use]
    pub fn detail_description(&self) -> Option<&str> {
        first_non_empty(&[&self.description, &self.small_description])
    }

    /// Category label for the detail panel: `category`, else `category_name`.
    #[must_use]
    pub fn detail_category(&self) -> Option<&str> {
        first_non_empty(&[&self.category, &self.category_name])
    }
}

fn first_non_empty<'a>(candidates: &[&'a String]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .map(String::as_str)
        .find(|s| !s.is_empty())
}

/// A plant category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Which slice of the catalog the plant grid shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActiveCategory {
    /// Unfiltered; the `"all"` sentinel.
    #[default]
    All,
    Category(CategoryId),
}

impl ActiveCategory {
    /// Sentinel used for [`ActiveCategory::All`] in URLs and markup.
    pub const ALL: &'static str = "all";

    /// The id used in URLs and markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Category(id) => id.as_str(),
        }
    }

    /// Whether this selection refers to `category`.
    #[must_use]
    pub fn matches(&self, category: &CategoryId) -> bool {
        matches!(self, Self::Category(id) if id == category)
    }
}

impl fmt::Display for ActiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActiveCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(Self::ALL) {
            Ok(Self::All)
        } else {
            Ok(Self::Category(CategoryId::new(s)))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn plant() -> Plant {
        Plant {
            id: PlantId::new(1),
            name: "Mango".to_string(),
            description: String::new(),
            small_description: String::new(),
            category: String::new(),
            category_name: String::new(),
            price: Price::from_units(50),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_card_and_detail_fallbacks_prefer_opposite_fields() {
        let mut p = plant();
        p.description = "Long".to_string();
        p.small_description = "Short".to_string();
        p.category = "Fruit Tree".to_string();
        p.category_name = "Fruit Trees".to_string();

        assert_eq!(p.card_blurb(), "Short");
        assert_eq!(p.detail_description(), Some("Long"));
        assert_eq!(p.card_category(), Some("Fruit Trees"));
        assert_eq!(p.detail_category(), Some("Fruit Tree"));
    }

    #[test]
    fn test_fallbacks_when_fields_missing() {
        let p = plant();
        assert_eq!(p.card_blurb(), "");
        assert_eq!(p.detail_description(), None);
        assert_eq!(p.card_category(), None);
    }

    #[test]
    fn test_active_category_parsing() {
        assert_eq!("all".parse::<ActiveCategory>().unwrap(), ActiveCategory::All);
        assert_eq!("ALL".parse::<ActiveCategory>().unwrap(), ActiveCategory::All);
        assert_eq!(
            "4".parse::<ActiveCategory>().unwrap(),
            ActiveCategory::Category(CategoryId::new("4"))
        );
        assert_eq!(ActiveCategory::default().as_str(), "all");
    }

    #[test]
    fn test_active_category_matches() {
        let active = ActiveCategory::Category(CategoryId::new("2"));
        assert!(active.matches(&CategoryId::new("2")));
        assert!(!active.matches(&CategoryId::new("3")));
        assert!(!ActiveCategory::All.matches(&CategoryId::new("2")));
    }
}
