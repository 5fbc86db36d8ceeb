//! Normalization of catalog API payloads into canonical types.
//!
//! The catalog API is loose about its shapes: the plant collection arrives
//! under `plants` or `data`, ids and prices may be numbers or strings, and
//! any descriptive field may be missing. Everything is resolved here so the
//! rest of the storefront sees exactly one `Plant` and one `Category` shape.

use std::str::FromStr;

use green_earth_core::{Category, CategoryId, Plant, PlantId, Price};
use rust_decimal::Decimal;
use serde_json::Value;

/// Field names the plant collection may arrive under, in priority order.
const PLANT_COLLECTION_FIELDS: &[&str] = &["plants", "data"];

/// Extract categories from a `/categories` response.
///
/// A missing `categories` field yields an empty list. Entries without an id
/// are skipped.
#[must_use]
pub fn categories_from_payload(payload: &Value) -> Vec<Category> {
    array_field(payload, "categories")
        .map(|entries| entries.iter().filter_map(convert_category).collect())
        .unwrap_or_default()
}

/// Extract plants from a `/plants` or `/category/{id}` response.
///
/// The first of `plants` / `data` that holds an array wins; neither present
/// yields an empty list. Entries without a usable id are skipped.
#[must_use]
pub fn plants_from_payload(payload: &Value) -> Vec<Plant> {
    PLANT_COLLECTION_FIELDS
        .iter()
        .find_map(|field| array_field(payload, field))
        .map(|entries| entries.iter().filter_map(convert_plant).collect())
        .unwrap_or_default()
}

fn array_field<'a>(payload: &'a Value, field: &str) -> Option<&'a Vec<Value>> {
    payload.get(field).and_then(Value::as_array)
}

fn convert_category(entry: &Value) -> Option<Category> {
    let id = text(entry.get("id"));
    if id.is_empty() {
        tracing::warn!(entry = %entry, "Skipping category without id");
        return None;
    }

    let name = first_text(entry, &["category_name", "name"]);

    Some(Category {
        id: CategoryId::new(id),
        name,
    })
}

fn convert_plant(entry: &Value) -> Option<Plant> {
    let Some(id) = plant_id(entry.get("id")) else {
        tracing::warn!(entry = %entry, "Skipping plant without usable id");
        return None;
    };

    Some(Plant {
        id,
        name: text(entry.get("name")),
        description: text(entry.get("description")),
        small_description: text(entry.get("small_description")),
        category: text(entry.get("category")),
        category_name: text(entry.get("category_name")),
        price: price(entry.get("price")),
        image_url: first_text(entry, &["image", "image_url"]),
    })
}

/// Render a scalar as text; anything else becomes the empty string.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn first_text(entry: &Value, fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| text(entry.get(field)))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn plant_id(value: Option<&Value>) -> Option<PlantId> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .and_then(|id| i32::try_from(id).ok())
            .map(PlantId::new),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Parse a price; missing, malformed and negative values are zero.
fn price(value: Option<&Value>) -> Price {
    let raw = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return Price::ZERO,
    };

    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_or(Price::ZERO, Price::new)
}
