//! Single-flight, load-once cache of the full dataset
//!
//! States and transitions:
//!
//! ```text
//! Empty ──get()──▶ Loading(shared) ──ok──▶ Loaded(records)
//!   ▲                    │
//!   └───────err──────────┘
//! ```
//!
//! The first caller starts the load; callers arriving while it runs await
//! the same shared future. Once loaded the dataset is immutable and served
//! for the lifetime of the cache.

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use super::loader::DatasetLoader;
use crate::core::{SaleRecord, StorageError};

/// Shared, immutable view of the loaded dataset
pub type Dataset = Arc<[SaleRecord]>;

type LoadFuture = Shared<BoxFuture<'static, Result<Dataset, StorageError>>>;

enum CacheState {
    Empty,
    Loading(LoadFuture),
    Loaded(Dataset),
}

pub struct DatasetCache {
    loader: Arc<dyn DatasetLoader>,
    state: Mutex<CacheState>,
}

impl DatasetCache {
    pub fn new(loader: impl DatasetLoader + 'static) -> Self {
        Self::from_arc(Arc::new(loader))
    }

    pub fn from_arc(loader: Arc<dyn DatasetLoader>) -> Self {
        Self {
            loader,
            state: Mutex::new(CacheState::Empty),
        }
    }

    /// A cache that starts out loaded with `records`
    pub fn preloaded(records: Vec<SaleRecord>) -> Self {
        Self {
            loader: Arc::new(super::loader::StaticDatasetLoader::default()),
            state: Mutex::new(CacheState::Loaded(Arc::from(records))),
        }
    }

    /// True once a load has completed successfully
    pub fn is_loaded(&self) -> bool {
        self.lock()
            .map(|state| matches!(*state, CacheState::Loaded(_)))
            .unwrap_or(false)
    }

    /// Return the dataset, loading it first if needed
    pub async fn get(&self) -> Result<Dataset, StorageError> {
        let pending = {
            let mut state = self.lock()?;
            let in_flight = match &*state {
                CacheState::Loaded(dataset) => return Ok(dataset.clone()),
                CacheState::Loading(pending) => Some(pending.clone()),
                CacheState::Empty => None,
            };
            match in_flight {
                Some(pending) => pending,
                None => {
                    let pending = self.start_load();
                    *state = CacheState::Loading(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        // Only the load that is still current may move the state forward
        let mut state = self.lock()?;
        let is_current = matches!(&*state, CacheState::Loading(current) if current.ptr_eq(&pending));
        if is_current {
            *state = match &result {
                Ok(dataset) => CacheState::Loaded(dataset.clone()),
                Err(_) => CacheState::Empty,
            };
        }

        result
    }

    fn start_load(&self) -> LoadFuture {
        let loader = self.loader.clone();
        async move {
            let source = loader.describe();
            let started = Instant::now();
            tracing::info!(source = %source, "Loading sales dataset");

            match loader.load().await {
                Ok(records) => {
                    tracing::info!(
                        source = %source,
                        records = records.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Sales dataset loaded"
                    );
                    Ok(Dataset::from(records))
                }
                Err(e) => {
                    tracing::error!(source = %source, error = %e, "Failed to load sales dataset");
                    Err(e)
                }
            }
        }
        .boxed()
        .shared()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheState>, StorageError> {
        self.state.lock().map_err(|e| StorageError::Unavailable {
            backend: format!("dataset cache ({})", e),
        })
    }
}
