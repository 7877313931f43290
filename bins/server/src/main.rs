//! Obmin SOAP server
//!
//! Main entry point for the currency-conversion service.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use obmin_api::{AppState, create_router};
use obmin_core::currency::RateTable;
use obmin_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "obmin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Build the rate table once; it is read-only for the process lifetime
    let rates = RateTable::builtin();
    info!(pairs = rates.len(), "rate table loaded");

    // Create application state
    let state = AppState {
        rates: Arc::new(rates),
        wsdl_dir: PathBuf::from(&config.wsdl.dir),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);
    info!("WSDL: http://{}/wsdl/currency.wsdl", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
