//! Typed error handling for the sales API
//!
//! Request-level problems (malformed numbers, bad dates, unknown sort keys)
//! never become errors: they are absorbed when the filter request is built.
//! What remains are genuine faults of the backing store, the configuration
//! or the server itself.
//!
//! # Error Categories
//!
//! - [`StorageError`]: the backing store or dataset loader failed
//! - [`ConfigError`]: configuration could not be read or is invalid
//!
//! # Example
//!
//! ```rust,ignore
//! match service.execute(&request).await {
//!     Ok(page) => Json(SalesResponse::from(page)).into_response(),
//!     Err(SalesError::Storage(e)) => {
//!         tracing::error!(error = %e, "sales query failed");
//!         SalesError::Storage(e).into_response()
//!     }
//!     Err(e) => e.into_response(),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the sales API
#[derive(Debug, Clone)]
pub enum SalesError {
    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for SalesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalesError::Storage(e) => write!(f, "{}", e),
            SalesError::Config(e) => write!(f, "{}", e),
            SalesError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SalesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SalesError::Storage(e) => Some(e),
            SalesError::Config(e) => Some(e),
            SalesError::Internal(_) => None,
        }
    }
}

/// Error body for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable summary
    pub message: String,
    /// The underlying error
    pub error: String,
}

impl SalesError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SalesError::Storage(StorageError::Unavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            SalesError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalesError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SalesError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SalesError::Storage(e) => e.error_code(),
            SalesError::Config(_) => "CONFIG_ERROR",
            SalesError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            SalesError::Storage(_) => "Failed to fetch sales data",
            SalesError::Config(_) => "Invalid server configuration",
            SalesError::Internal(_) => "Internal Server Error",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            code: self.error_code().to_string(),
            message: self.summary().to_string(),
            error: self.to_string(),
        }
    }
}

impl IntoResponse for SalesError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by storage backends and dataset loaders
///
/// `Clone` so a single failed load can be handed to every caller waiting on it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    #[error("Failed to load dataset from {source_name}: {message}")]
    LoadError {
        source_name: String,
        message: String,
    },

    #[error("Record decoding error: {message}")]
    DecodeError { message: String },

    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ConnectionError { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::QueryError { .. } => "STORAGE_QUERY_ERROR",
            StorageError::LoadError { .. } => "DATASET_LOAD_ERROR",
            StorageError::DecodeError { .. } => "RECORD_DECODE_ERROR",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

impl From<StorageError> for SalesError {
    fn from(err: StorageError) -> Self {
        SalesError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

impl From<ConfigError> for SalesError {
    fn from(err: ConfigError) -> Self {
        SalesError::Config(err)
    }
}
