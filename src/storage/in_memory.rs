//! In-memory implementation of SalesQueryService
//!
//! Holds the whole dataset in a load-once cache and evaluates every request
//! with the shared `FilterTree` and `SortSpec`. Useful for development, tests
//! and CSV snapshots small enough to keep resident.

use async_trait::async_trait;
use std::sync::Arc;

use super::cache::{Dataset, DatasetCache};
use super::loader::DatasetLoader;
use crate::core::{
    FilterRequest, FilterTree, OverflowPolicy, Paginator, ResultPage, SaleRecord,
    SalesError, SalesQueryService,
};

/// In-memory sales query service
#[derive(Clone)]
pub struct InMemorySalesService {
    cache: Arc<DatasetCache>,
}

impl InMemorySalesService {
    /// Create a service that loads its dataset from `loader` on first use
    pub fn new(loader: impl DatasetLoader + 'static) -> Self {
        Self {
            cache: Arc::new(DatasetCache::new(loader)),
        }
    }

    /// Create a service over records already in memory
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self {
            cache: Arc::new(DatasetCache::preloaded(records)),
        }
    }

    /// Load the dataset now rather than on the first request
    pub async fn warm_up(&self) -> Result<usize, SalesError> {
        Ok(self.cache.get().await?.len())
    }

    fn evaluate(dataset: &Dataset, request: &FilterRequest) -> ResultPage {
        let tree = FilterTree::from_request(request);
        let predicate = tree.predicate();

        let mut matching: Vec<&SaleRecord> = dataset.iter().filter(|&r| predicate(r)).collect();
        request.sort.sort(&mut matching);

        let paginator = Paginator::new(request.page, request.page_size, OverflowPolicy::Clamp);
        let (page, pagination) = paginator.apply(matching);

        ResultPage {
            data: page.into_iter().cloned().collect(),
            pagination,
        }
    }
}

#[async_trait]
impl SalesQueryService for InMemorySalesService {
    async fn execute(&self, request: &FilterRequest) -> Result<ResultPage, SalesError> {
        let dataset = self.cache.get().await?;
        let page = Self::evaluate(&dataset, request);

        tracing::debug!(
            backend = self.backend_name(),
            sort = %request.sort.as_param(),
            total_items = page.pagination.total_items,
            page = page.pagination.current_page,
            "Evaluated sales query"
        );

        Ok(page)
    }

    fn backend_name(&self) -> &'static str {
        "in-memory"
    }

    fn overflow_policy(&self) -> OverflowPolicy {
        OverflowPolicy::Clamp
    }

    fn is_ready(&self) -> bool {
        self.cache.is_loaded()
    }
}
