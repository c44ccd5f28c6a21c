//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::handlers::SalesState;
use crate::config::AppConfig;
use crate::core::SalesQueryService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the sales HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_sales_service(InMemorySalesService::new(CsvDatasetLoader::new("sales.csv")))
///     .build()?;
/// ```
pub struct ServerBuilder {
    sales_service: Option<Arc<dyn SalesQueryService>>,
    config: AppConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            sales_service: None,
            config: AppConfig::default_config(),
            custom_routes: Vec::new(),
        }
    }

    /// Create a builder whose service is the backend named in `config`
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let service = config.backend.connect().await?;

        tracing::info!(backend = service.backend_name(), "Sales backend ready");

        Ok(Self::new()
            .with_shared_service(service)
            .with_config(config))
    }

    /// Set the sales service (required)
    pub fn with_sales_service(self, service: impl SalesQueryService + 'static) -> Self {
        self.with_shared_service(Arc::new(service))
    }

    /// Set an already shared sales service
    pub fn with_shared_service(mut self, service: Arc<dyn SalesQueryService>) -> Self {
        self.sales_service = Some(service);
        self
    }

    /// Use `config` for pagination defaults, facet options and the bind address
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the sales API, such as exports or
    /// admin pages.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{Router, routing::get};
    ///
    /// let admin = Router::new().route("/admin/stats", get(stats_handler));
    ///
    /// ServerBuilder::new()
    ///     .with_sales_service(service)
    ///     .with_custom_routes(admin)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the state shared by every handler
    fn build_state(&mut self) -> Result<SalesState> {
        let service = self.sales_service.take().ok_or_else(|| {
            anyhow::anyhow!("SalesQueryService is required. Call .with_sales_service()")
        })?;

        Ok(SalesState {
            service,
            facets: Arc::new(self.config.facets.clone()),
            default_page_size: self.config.pagination.default_page_size.max(1),
        })
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let custom_routes = std::mem::take(&mut self.custom_routes);
        Ok(RestExposure::build_router(state, custom_routes))
    }

    /// The address `serve_configured` binds to
    pub fn bind_address(&self) -> String {
        self.config.server.bind_address()
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_sales_service(service)
    ///     .serve("127.0.0.1:5000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);
        tracing::info!("API endpoint: http://{}/api/sales", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on the address from the builder's configuration
    pub async fn serve_configured(self) -> Result<()> {
        let addr = self.bind_address();
        self.serve(&addr).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use crate::storage::InMemorySalesService;

    // ── Constructor tests ────────────────────────────────────────────────

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.sales_service.is_none());
        assert!(builder.custom_routes.is_empty());
        assert_eq!(builder.config, AppConfig::default_config());
    }

    #[test]
    fn test_default_is_same_as_new() {
        let builder = ServerBuilder::default();
        assert!(builder.sales_service.is_none());
        assert!(builder.custom_routes.is_empty());
    }

    // ── with_* ───────────────────────────────────────────────────────────

    #[test]
    fn test_with_sales_service_sets_service() {
        let builder =
            ServerBuilder::new().with_sales_service(InMemorySalesService::from_records(vec![]));
        assert!(builder.sales_service.is_some());
    }

    #[test]
    fn test_with_custom_routes_appends_router() {
        let builder = ServerBuilder::new()
            .with_custom_routes(Router::new())
            .with_custom_routes(Router::new());
        assert_eq!(builder.custom_routes.len(), 2);
    }

    #[test]
    fn test_with_config_sets_bind_address() {
        let mut config = AppConfig::default_config();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8081;
        let builder = ServerBuilder::new().with_config(config);
        assert_eq!(builder.bind_address(), "127.0.0.1:8081");
    }

    // ── build ────────────────────────────────────────────────────────────

    #[test]
    fn test_build_without_service_fails() {
        let result = ServerBuilder::new().build();
        let err_msg = format!("{}", result.err().expect("should be Err"));
        assert!(
            err_msg.contains("SalesQueryService is required"),
            "error should name the missing service: {}",
            err_msg
        );
    }

    #[test]
    fn test_build_state_uses_config() {
        let mut config = AppConfig::default_config();
        config.pagination.default_page_size = 25;
        config.facets.regions = vec!["North".to_string()];

        let mut builder = ServerBuilder::new()
            .with_sales_service(InMemorySalesService::from_records(vec![]))
            .with_config(config);
        let state = builder.build_state().expect("state should build");

        assert_eq!(state.default_page_size, 25);
        assert_eq!(state.facets.regions, vec!["North"]);
        assert!(builder.sales_service.is_none());
    }

    #[tokio::test]
    async fn test_from_config_rejects_invalid_config() {
        let mut config = AppConfig::default_config();
        config.server.port = 0;
        assert!(ServerBuilder::from_config(config).await.is_err());
    }

    #[tokio::test]
    async fn test_from_config_builds_in_memory_backend() {
        let mut config = AppConfig::default_config();
        config.backend = BackendConfig::InMemory {
            csv_path: "/unused.csv".to_string(),
        };
        let builder = ServerBuilder::from_config(config).await.expect("builder");
        assert!(builder.build().is_ok());
    }
}
