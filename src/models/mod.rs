//! Domain records plus the request and response models of the HTTP API
//!
//! Request/response types are the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP bodies.

pub mod item;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use item::{Item, ItemCollection};
pub use requests::{ListItemsQuery, NewItem};
pub use responses::{
    ErrorResponse, HealthResponse, PageResponse, PaginationMeta, RefreshResponse,
    StrategyInfoResponse,
};
