//! The SOAP currency-conversion endpoint.
//!
//! The handler walks the pipeline: read body → validate → convert →
//! encode. Every validation failure comes back as a Fault value whose
//! code decides the HTTP status; exactly one response is written per
//! request.

use axum::{
    Router,
    body::to_bytes,
    extract::{Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{error, info};

use obmin_core::currency::convert;
use obmin_soap::{ConversionResponse, Envelope, Fault, RequestValidator, TEXT_XML, encode};

use crate::AppState;

/// Request bodies beyond this size are treated as unreadable.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Creates the conversion routes. Only POST is registered; the router
/// answers other methods with a bare 405.
pub fn routes() -> Router<AppState> {
    Router::new().route("/soap/convert-currency", post(convert_currency))
}

/// POST `/soap/convert-currency` - SOAP currency conversion.
async fn convert_currency(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let body = to_bytes(body, MAX_BODY_BYTES).await;

    let validator = RequestValidator::new(&state.rates);
    let validated = validator.validate(
        content_type,
        body.as_ref()
            .map(|bytes| bytes.as_ref())
            .map_err(|err| err.to_string()),
    );

    let conversion_request = match validated {
        Ok(request) => request,
        Err(fault) => {
            info!(
                code = fault.code.as_str(),
                message = %fault.message,
                "rejected conversion request"
            );
            return fault_response(&fault);
        }
    };

    let Some(conversion) = convert(
        &state.rates,
        conversion_request.amount,
        conversion_request.from_currency,
        conversion_request.to_currency,
    ) else {
        error!(
            from = %conversion_request.from_currency,
            to = %conversion_request.to_currency,
            "rate missing after validation"
        );
        return fault_response(&Fault::server("Currency conversion failed").with_detail(format!(
            "No rate available for {} to {}",
            conversion_request.from_currency, conversion_request.to_currency
        )));
    };

    info!(
        from = %conversion_request.from_currency,
        to = %conversion_request.to_currency,
        rate = conversion.rate,
        "converted amount"
    );

    let envelope = Envelope::response(ConversionResponse {
        converted_amount: conversion.converted_amount,
        from_currency: conversion_request.from_currency,
        to_currency: conversion_request.to_currency,
        rate: conversion.rate,
    });

    match encode(&envelope) {
        Ok(bytes) => xml_response(StatusCode::OK, bytes),
        Err(err) => {
            error!(error = %err, "failed to encode conversion response");
            fault_response(&Fault::server("Failed to encode response").with_detail(err.to_string()))
        }
    }
}

fn fault_response(fault: &Fault) -> Response {
    let status =
        StatusCode::from_u16(fault.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match encode(&Envelope::fault(fault.clone())) {
        Ok(bytes) => xml_response(status, bytes),
        Err(err) => {
            // Last resort: the fault itself would not serialize.
            error!(error = %err, "failed to encode fault envelope");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn xml_response(status: StatusCode, bytes: Vec<u8>) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_XML)], bytes).into_response()
}
