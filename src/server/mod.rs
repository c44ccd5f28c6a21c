//! Server module for building the sales HTTP server
//!
//! This module provides a `ServerBuilder` that wires a `SalesQueryService`
//! and an `AppConfig` into an Axum router exposing:
//! - the filtered sales listing
//! - facet and sort options for the filter panel
//! - health checks

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use handlers::SalesState;
