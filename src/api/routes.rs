//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{routing::get, routing::post, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_info_handler, create_item_handler, get_item_handler, health_handler,
    list_items_handler, refresh_stats_handler, stats_handler, strategy_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/items", get(list_items_handler).post(create_item_handler))
        .route("/api/items/stats/strategy", get(strategy_handler))
        .route("/api/items/:id", get(get_item_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/stats/refresh", post(refresh_stats_handler))
        .route("/api/stats/cache-info", get(cache_info_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
