//! Storage implementations for different backends

pub mod cache;
pub mod in_memory;
pub mod loader;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use cache::{Dataset, DatasetCache};
pub use in_memory::InMemorySalesService;
pub use loader::{CsvDatasetLoader, DatasetLoader, StaticDatasetLoader};
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoSalesService;
