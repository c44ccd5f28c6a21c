//! Dataset loaders feeding the in-memory backend

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::core::{SaleRecord, StorageError};

/// Source of the full sales dataset
///
/// Called at most once per successful cache fill; a failed load may be
/// retried by a later request.
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Read every record, in storage order
    async fn load(&self) -> Result<Vec<SaleRecord>, StorageError>;

    /// Human-readable description of the source, for logs and errors
    fn describe(&self) -> String;
}

/// Loads records from a CSV snapshot whose header row uses store column names
///
/// Every cell is read as text and coerced by the record's lenient
/// deserializers, so phone numbers keep leading zeros and blank numeric
/// cells become zero.
#[derive(Debug, Clone)]
pub struct CsvDatasetLoader {
    path: PathBuf,
}

impl CsvDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(path: &Path) -> Result<Vec<SaleRecord>, StorageError> {
        let load_error = |message: String| StorageError::LoadError {
            source_name: path.display().to_string(),
            message,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_path(path)
            .map_err(|e| load_error(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| load_error(e.to_string()))?
            .clone();

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row.map_err(|e| load_error(e.to_string()))?;
            let object: serde_json::Map<String, serde_json::Value> = headers
                .iter()
                .zip(row.iter())
                .map(|(header, cell)| {
                    (header.to_string(), serde_json::Value::String(cell.to_string()))
                })
                .collect();

            let record = serde_json::from_value(serde_json::Value::Object(object))
                .map_err(|e| load_error(format!("row {}: {}", index + 1, e)))?;
            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl DatasetLoader for CsvDatasetLoader {
    async fn load(&self) -> Result<Vec<SaleRecord>, StorageError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read_all(&path))
            .await
            .map_err(|e| StorageError::LoadError {
                source_name: self.describe(),
                message: e.to_string(),
            })?
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// Serves a fixed set of records; used for fixtures and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticDatasetLoader {
    records: Vec<SaleRecord>,
}

impl StaticDatasetLoader {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetLoader for StaticDatasetLoader {
    async fn load(&self) -> Result<Vec<SaleRecord>, StorageError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} records", self.records.len())
    }
}
