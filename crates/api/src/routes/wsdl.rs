//! Static WSDL document serving.
//!
//! Client tooling fetches the contract from here; the SOAP codec stays
//! consistent with the served document but does not generate it.

use std::io;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::error;

use obmin_soap::TEXT_XML;

use crate::AppState;

/// Creates the WSDL routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/wsdl/{file}", get(serve_wsdl))
}

/// GET `/wsdl/{file}` - serves a WSDL document from the configured directory.
async fn serve_wsdl(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    // Only the final path component is honored.
    let Some(name) = std::path::Path::new(&file).file_name() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let path = state.wsdl_dir.join(name);

    match tokio::fs::read(&path).await {
        Ok(bytes) => (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_XML)], bytes).into_response(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!(error = %err, path = %path.display(), "failed to read WSDL file");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reading WSDL file").into_response()
        }
    }
}
