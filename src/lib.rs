//! # Retail Sales
//!
//! A read-only API over retail sales transactions with faceted filtering,
//! free-text search, sorting and pagination.
//!
//! ## Features
//!
//! - **One query contract, two backends**: MongoDB pushdown or an in-memory
//!   dataset, both selecting and ordering identical records
//! - **Lenient parameters**: malformed numbers, dates and sort keys degrade to
//!   sensible defaults instead of failing the request
//! - **Dual phone encoding**: phone numbers stored as integers or strings are
//!   matched by the same search
//! - **Single-flight loading**: concurrent first requests share one dataset load
//! - **Configuration-Based**: server, backend and facet options from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use retail_sales::prelude::*;
//!
//! let service = InMemorySalesService::new(CsvDatasetLoader::new("data/sales.csv"));
//!
//! let request = FilterRequest::new()
//!     .with_regions(["North", "South"])
//!     .with_age_range(Some(25), Some(40))
//!     .with_sort("amount-desc");
//! let page = service.execute(&request).await?;
//!
//! // Or serve it over HTTP
//! ServerBuilder::new()
//!     .with_sales_service(service)
//!     .serve("0.0.0.0:5000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ConfigError, FilterRequest, FilterTree, OverflowPolicy, PageSummary, PaginationMeta,
        PhoneNumber, ResultPage, SaleRecord, SalesError, SalesQueryParams, SalesQueryService,
        SalesResponse, SortDirection, SortKey, SortSpec, StorageError,
    };

    // === Storage ===
    pub use crate::storage::{
        CsvDatasetLoader, DatasetLoader, InMemorySalesService, StaticDatasetLoader,
    };
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoSalesService;

    // === Config ===
    pub use crate::config::{AppConfig, BackendConfig, FacetOptions};

    // === Server ===
    pub use crate::server::{SalesState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{Router, routing::get};
}
