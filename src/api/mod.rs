//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /api/items` - List items (`searchQuery`, `pageNumber`, `itemsPerPage`)
//! - `POST /api/items` - Create an item
//! - `GET /api/items/:id` - Retrieve an item by id
//! - `GET /api/items/stats/strategy` - Current read strategy
//! - `GET /api/stats` - Aggregate statistics
//! - `POST /api/stats/refresh` - Recompute statistics
//! - `GET /api/stats/cache-info` - Statistics cache state
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
