//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod convert;
pub mod health;
pub mod wsdl;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", health::routes())
        .merge(convert::routes())
        .merge(wsdl::routes())
}
