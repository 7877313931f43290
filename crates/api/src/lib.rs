//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The SOAP conversion endpoint
//! - Static WSDL serving
//! - A health check route

pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use obmin_core::currency::RateTable;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only rate table, built once at startup.
    pub rates: Arc<RateTable>,
    /// Directory holding the statically served WSDL documents.
    pub wsdl_dir: PathBuf,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
