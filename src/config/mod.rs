//! Configuration loading and management
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 5000
//! backend:
//!   type: mongodb
//!   uri: mongodb://localhost:27017
//!   database: retail_sales
//!   collection: sales
//! pagination:
//!   default_page_size: 10
//! ```
//!
//! Every section is optional; missing sections take their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::core::query::DEFAULT_PAGE_SIZE;
use crate::core::{ConfigError, SalesError, SalesQueryService};
use crate::storage::{CsvDatasetLoader, InMemorySalesService};

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for a TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which storage backend answers queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Whole dataset loaded from a CSV snapshot and queried in memory
    InMemory { csv_path: String },

    /// Queries pushed down to a MongoDB collection
    Mongodb {
        uri: String,
        #[serde(default = "default_database")]
        database: String,
        #[serde(default = "default_collection")]
        collection: String,
    },
}

fn default_database() -> String {
    "retail_sales".to_string()
}

fn default_collection() -> String {
    "sales".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::InMemory {
            csv_path: "data/sales.csv".to_string(),
        }
    }
}

impl BackendConfig {
    pub fn name(&self) -> &'static str {
        match self {
            BackendConfig::InMemory { .. } => "in-memory",
            BackendConfig::Mongodb { .. } => "mongodb",
        }
    }

    /// Construct the query service this backend describes
    ///
    /// The in-memory backend defers reading its CSV to the first query.
    pub async fn connect(&self) -> Result<Arc<dyn SalesQueryService>, SalesError> {
        match self {
            BackendConfig::InMemory { csv_path } => Ok(Arc::new(InMemorySalesService::new(
                CsvDatasetLoader::new(csv_path),
            ))),
            #[cfg(feature = "mongodb_backend")]
            BackendConfig::Mongodb {
                uri,
                database,
                collection,
            } => {
                let service =
                    crate::storage::MongoSalesService::connect(uri, database, collection).await?;
                service.ensure_indexes().await?;
                Ok(Arc::new(service))
            }
            #[cfg(not(feature = "mongodb_backend"))]
            BackendConfig::Mongodb { .. } => Err(ConfigError::InvalidValue {
                field: "backend.type".to_string(),
                value: "mongodb".to_string(),
                message: "built without the mongodb_backend feature".to_string(),
            }
            .into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when a request omits `pageSize` or sends an invalid one
    pub default_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Values offered for each multi-select filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FacetOptions {
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
}

impl Default for FacetOptions {
    fn default() -> Self {
        let owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();
        Self {
            regions: owned(&["North", "South", "East", "West", "Central"]),
            genders: owned(&["Male", "Female"]),
            categories: owned(&["Electronics", "Clothing", "Beauty"]),
            tags: owned(&[
                "smart", "portable", "wireless", "gadgets", "fashion", "casual", "organic",
                "skincare",
            ]),
            payment_methods: owned(&["Cash", "Credit Card", "Debit Card", "UPI"]),
        }
    }
}

/// Complete configuration for the sales server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub pagination: PaginationConfig,
    pub facets: FacetOptions,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Apply `PORT`, `SALES_CSV_PATH` and `MONGO_URI` from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// `SALES_CSV_PATH` selects the in-memory backend; `MONGO_URI` selects
    /// MongoDB and wins when both are set.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                value: port.clone(),
                message: "expected a port number".to_string(),
            })?;
        }

        if let Some(csv_path) = lookup("SALES_CSV_PATH") {
            self.backend = BackendConfig::InMemory { csv_path };
        }

        if let Some(uri) = lookup("MONGO_URI") {
            self.backend = match std::mem::take(&mut self.backend) {
                BackendConfig::Mongodb {
                    database,
                    collection,
                    ..
                } => BackendConfig::Mongodb {
                    uri,
                    database,
                    collection,
                },
                BackendConfig::InMemory { .. } => BackendConfig::Mongodb {
                    uri,
                    database: default_database(),
                    collection: default_collection(),
                },
            };
        }

        Ok(())
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, value: &str, message: &str| ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        };

        if self.server.port == 0 {
            return Err(invalid("server.port", "0", "port must be non-zero"));
        }
        if self.pagination.default_page_size == 0 {
            return Err(invalid(
                "pagination.default_page_size",
                "0",
                "page size must be at least 1",
            ));
        }

        match &self.backend {
            BackendConfig::InMemory { csv_path } if csv_path.trim().is_empty() => {
                Err(invalid("backend.csv_path", csv_path, "path must not be empty"))
            }
            BackendConfig::Mongodb { uri, .. } if uri.trim().is_empty() => {
                Err(invalid("backend.uri", uri, "URI must not be empty"))
            }
            BackendConfig::Mongodb {
                database,
                collection,
                ..
            } if database.trim().is_empty() || collection.trim().is_empty() => Err(invalid(
                "backend.database",
                &format!("{}.{}", database, collection),
                "database and collection must be named",
            )),
            _ => Ok(()),
        }
    }
}
