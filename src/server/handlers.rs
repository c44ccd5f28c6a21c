//! HTTP handlers for the sales API
//!
//! Handlers are thin: they turn query pairs into a [`FilterRequest`], hand it
//! to whichever [`SalesQueryService`] the server was built with and wrap the
//! outcome in the response envelope.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use crate::config::FacetOptions;
use crate::core::sort::SortOption;
use crate::core::{FilterRequest, SalesQueryParams, SalesQueryService, SalesResponse, SortSpec};

/// Application state shared across handlers
#[derive(Clone)]
pub struct SalesState {
    pub service: Arc<dyn SalesQueryService>,
    pub facets: Arc<FacetOptions>,
    /// Page size applied when a request has no usable `pageSize`
    pub default_page_size: usize,
}

/// Selectable values for the filter panel and sort dropdown
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(flatten)]
    pub facets: FacetOptions,
    pub sort_options: Vec<SortOption>,
}

#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    pub success: bool,
    pub data: FilterOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub backend: &'static str,
    pub dataset_loaded: bool,
}

#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub success: bool,
    pub message: &'static str,
}

/// List sales records
///
/// GET /api/sales?search=..&region=..&gender=..&category=..&payment=..&tags=..
///     &ageMin=..&ageMax=..&dateFrom=..&dateTo=..&sortBy=..&page=..&pageSize=..
pub async fn list_sales(
    State(state): State<SalesState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = SalesQueryParams::from_pairs(pairs);
    let request = FilterRequest::from_params(&params, state.default_page_size);

    tracing::debug!(
        search = request.search.as_deref().unwrap_or(""),
        sort = %request.sort.as_param(),
        page = request.page,
        page_size = request.page_size,
        "Listing sales"
    );

    match state.service.execute(&request).await {
        Ok(page) => Json(SalesResponse::from(page)).into_response(),
        Err(e) => {
            tracing::error!(
                backend = state.service.backend_name(),
                error = %e,
                "Sales query failed"
            );
            e.into_response()
        }
    }
}

/// Facet values and sort options
///
/// GET /api/sales/options
pub async fn filter_options(State(state): State<SalesState>) -> Json<FilterOptionsResponse> {
    Json(FilterOptionsResponse {
        success: true,
        data: FilterOptions {
            facets: state.facets.as_ref().clone(),
            sort_options: SortSpec::options(),
        },
    })
}

/// GET /api/health
pub async fn health(State(state): State<SalesState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "Server is running",
        backend: state.service.backend_name(),
        dataset_loaded: state.service.is_ready(),
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            success: false,
            message: "Route not found",
        }),
    )
}
