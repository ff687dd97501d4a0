//! Catalog item model
//!
//! The record type held by the backing store and served to callers.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, assigned by the write path
    pub id: u64,
    /// Display name
    pub name: String,
    /// Category label, may be empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    /// Non-negative price
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Read-only snapshot of the whole collection, in store order.
///
/// Shared by reference so cache hits never copy the records.
pub type ItemCollection = Arc<Vec<Item>>;
