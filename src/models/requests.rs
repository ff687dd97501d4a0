//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

/// Default page when `pageNumber` is absent
pub const DEFAULT_PAGE: usize = 1;

/// Default page size when `itemsPerPage` is absent
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Query string for GET /api/items
///
/// Numbers arrive as raw strings so a malformed value produces the API's own
/// JSON error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
    /// 1-based page number
    pub page_number: Option<String>,
    /// Page size
    pub items_per_page: Option<String>,
    /// Free-text filter
    pub search_query: Option<String>,
}

impl ListItemsQuery {
    /// Resolves `(page, per_page)`, applying defaults for absent values.
    ///
    /// Returns an error message if either value is present but not a
    /// positive integer.
    pub fn pagination(&self) -> Result<(usize, usize), String> {
        let page = parse_positive(self.page_number.as_deref(), DEFAULT_PAGE);
        let per_page = parse_positive(self.items_per_page.as_deref(), DEFAULT_ITEMS_PER_PAGE);

        match (page, per_page) {
            (Some(page), Some(per_page)) => Ok((page, per_page)),
            _ => Err(
                "Invalid pagination parameters. pageNumber and itemsPerPage must be positive integers."
                    .to_string(),
            ),
        }
    }
}

fn parse_positive(raw: Option<&str>, default: usize) -> Option<usize> {
    match raw {
        None => Some(default),
        Some(value) => value.trim().parse::<usize>().ok().filter(|n| *n > 0),
    }
}

/// Request body for POST /api/items
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    /// Display name
    pub name: String,
    /// Category label
    #[serde(default)]
    pub category: String,
    /// Price, must be finite and non-negative
    pub price: f64,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl NewItem {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Item name cannot be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Some("Item price must be a non-negative number".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListItemsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.pagination(), Ok((1, 10)));
        assert!(query.search_query.is_none());
    }

    #[test]
    fn test_list_query_camel_case() {
        let json = r#"{"pageNumber": "2", "itemsPerPage": "5", "searchQuery": "desk"}"#;
        let query: ListItemsQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.pagination(), Ok((2, 5)));
        assert_eq!(query.search_query.as_deref(), Some("desk"));
    }

    #[test]
    fn test_list_query_rejects_invalid_numbers() {
        for (page, per_page) in [("0", "10"), ("1", "0"), ("abc", "10"), ("1", "-3")] {
            let query = ListItemsQuery {
                page_number: Some(page.to_string()),
                items_per_page: Some(per_page.to_string()),
                search_query: None,
            };
            assert!(query.pagination().is_err(), "{page}/{per_page} accepted");
        }
    }

    #[test]
    fn test_new_item_deserialize() {
        let json = r#"{"name": "Lamp", "category": "Home", "price": 19.5}"#;
        let item: NewItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "Lamp");
        assert_eq!(item.category, "Home");
        assert!(item.description.is_none());
        assert!(item.validate().is_none());
    }

    #[test]
    fn test_validate_empty_name() {
        let item = NewItem {
            name: "   ".to_string(),
            category: String::new(),
            price: 1.0,
            description: None,
        };
        assert!(item.validate().is_some());
    }

    #[test]
    fn test_validate_negative_price() {
        let item = NewItem {
            name: "Lamp".to_string(),
            category: String::new(),
            price: -0.01,
            description: None,
        };
        assert!(item.validate().is_some());
    }
}
