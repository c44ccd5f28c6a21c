//! Sales API server
//!
//! This example demonstrates:
//! - Loading an `AppConfig` from YAML with environment overrides
//! - Choosing the in-memory (CSV) or MongoDB backend from configuration
//! - Serving the sales API with graceful shutdown
//!
//! ```sh
//! cargo run --example sales_server -- demos/sales_server/sales.yaml
//! MONGO_URI=mongodb://localhost:27017 cargo run --example sales_server --features mongodb_backend
//! ```

use retail_sales::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("🛒 Retail Sales API");
    println!("===================\n");

    // Load configuration
    let mut config = match std::env::args().nth(1).or_else(|| std::env::var("SALES_CONFIG").ok()) {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::default_config(),
    };
    config.apply_env_overrides()?;

    println!("✅ Configuration:");
    println!("   - backend: {}", config.backend.name());
    println!("   - default page size: {}", config.pagination.default_page_size);
    println!("   - listening on: {}\n", config.server.bind_address());

    println!("📚 Endpoints:");
    println!("   GET /api/sales            ?search=&region=&gender=&category=&payment=&tags=");
    println!("                             &ageMin=&ageMax=&dateFrom=&dateTo=&sortBy=&page=&pageSize=");
    println!("   GET /api/sales/options");
    println!("   GET /api/health\n");

    ServerBuilder::from_config(config)
        .await?
        .serve_configured()
        .await
}
