//! Core module: the record model and the filter/search/sort/paginate contract

pub mod error;
pub mod filter;
pub mod normalize;
pub mod pagination;
pub mod query;
pub mod record;
pub mod search;
pub mod service;
pub mod sort;
pub mod summary;

pub use error::{ConfigError, SalesError, StorageError};
pub use filter::{Clause, FacetField, FilterTree};
pub use pagination::{OverflowPolicy, PaginationMeta, Paginator};
pub use query::{FilterRequest, ResultPage, SalesQueryParams, SalesResponse};
pub use record::{PhoneNumber, SaleRecord};
pub use search::SearchMatcher;
pub use service::SalesQueryService;
pub use sort::{SortDirection, SortKey, SortSpec};
pub use summary::PageSummary;
