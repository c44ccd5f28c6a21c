//! Router builder utilities for sales routes

use super::handlers::{SalesState, filter_options, health, list_sales};
use axum::{Router, routing::get};

/// Build the sales routes
///
/// - GET /api/sales - Filtered, sorted, paginated listing
/// - GET /api/sales/options - Facet values and sort options
/// - GET /api/health, /health - Liveness and dataset readiness
pub fn build_sales_routes(state: SalesState) -> Router {
    Router::new()
        .route("/api/sales", get(list_sales))
        .route("/api/sales/options", get(filter_options))
        .route("/api/health", get(health))
        .route("/health", get(health))
        .with_state(state)
}
