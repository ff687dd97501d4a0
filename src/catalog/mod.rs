//! Catalog Module
//!
//! Item lookups, listing, search and writes, served through the adaptive cache.

mod query;
mod service;

pub use query::{paginate, search_items};
pub use service::CatalogService;
