//! REST API exposure for the sales service
//!
//! Consumes a [`SalesState`] and produces the Axum `Router` served over HTTP,
//! with request tracing, permissive CORS and a JSON 404 fallback.

use crate::server::handlers::{SalesState, not_found};
use crate::server::router::build_sales_routes;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from the sales state
    ///
    /// Custom routes are merged before the fallback, so they take priority
    /// over the 404 handler but may not shadow the sales routes.
    pub fn build_router(state: SalesState, custom_routes: Vec<Router>) -> Router {
        let mut app = build_sales_routes(state);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.fallback(not_found).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
    }
}
