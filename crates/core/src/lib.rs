//! Green Earth Core - Catalog and cart state.
//!
//! This crate holds everything the storefront knows about plants and the
//! visitor's cart, with no I/O of its own:
//! - `storefront` - Fetches the catalog, renders it, and drives this state
//! - `integration-tests` - End-to-end checks against a fake catalog API
//!
//! # Architecture
//!
//! The core crate contains only types and synchronous state transitions - no
//! HTTP clients, no templates. Handlers own a [`Catalog`] and a [`Cart`] per
//! visitor and mutate them inside short critical sections.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, plants and categories
//! - [`catalog`] - Last-fetched plants, active category, fetch ordering
//! - [`cart`] - Cart lines, add/remove, totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, FetchTicket, LookupMiss};
pub use types::*;
