//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod plant;
pub mod price;

pub use id::*;
pub use plant::{ActiveCategory, Category, Plant};
pub use price::Price;
