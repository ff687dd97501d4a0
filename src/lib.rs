//! Catalog Cache - catalog item service with an adaptive read cache
//!
//! Serves a file-backed item collection through a cache whose policy is
//! chosen from the store size, with stale fallback on read failures and a
//! derived statistics cache on top.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::{CatalogError, Result};
