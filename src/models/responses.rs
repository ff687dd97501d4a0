//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{StatsSnapshot, StrategyInfo};

/// Pagination metadata attached to every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// Response body for GET /api/items
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
    /// Records on the requested page
    pub items: Vec<T>,
    /// Page position within the filtered collection
    pub pagination: PaginationMeta,
}

/// Response body for GET /api/items/stats/strategy
#[derive(Debug, Clone, Serialize)]
pub struct StrategyInfoResponse {
    pub success: bool,
    pub data: StrategyInfo,
    pub message: String,
}

impl StrategyInfoResponse {
    /// Wraps the current strategy information
    pub fn new(data: StrategyInfo) -> Self {
        Self {
            success: true,
            data,
            message: "Current data manager strategy information".to_string(),
        }
    }
}

/// Response body for POST /api/stats/refresh
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub stats: StatsSnapshot,
}

impl RefreshResponse {
    /// Wraps a freshly computed snapshot
    pub fn new(stats: StatsSnapshot) -> Self {
        Self {
            success: true,
            message: "Stats cache refreshed manually".to_string(),
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status ("OK")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "OK".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// When the error was produced, ISO 8601
    pub timestamp: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_serialize() {
        let meta = PaginationMeta {
            current_page: 2,
            total_pages: 5,
            total_items: 50,
            items_per_page: 10,
            has_next_page: true,
            has_prev_page: true,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPages"], 5);
        assert_eq!(json["hasPrevPage"], true);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("OK"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Item not found");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"], "Item not found");
        assert!(json["timestamp"].is_string());
    }
}
