//! The query executor contract shared by every storage backend

use async_trait::async_trait;

use super::error::SalesError;
use super::pagination::OverflowPolicy;
use super::query::{FilterRequest, ResultPage};

/// Executes filter → search → sort → paginate over the sales dataset
///
/// Implementations must select and order identical records for identical
/// requests. They may differ only in how a page past the last one is
/// served, which each reports through [`SalesQueryService::overflow_policy`].
/// Each call is independent; implementations hold no per-request state.
#[async_trait]
pub trait SalesQueryService: Send + Sync {
    /// Run a request and return one page of results
    async fn execute(&self, request: &FilterRequest) -> Result<ResultPage, SalesError>;

    /// Short backend identifier, used in logs and the health check
    fn backend_name(&self) -> &'static str;

    /// How a page number past the last page is served
    fn overflow_policy(&self) -> OverflowPolicy;

    /// Whether the backend can answer without first loading data
    fn is_ready(&self) -> bool {
        true
    }
}
