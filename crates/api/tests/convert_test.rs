//! End-to-end tests for the SOAP conversion endpoint.
//!
//! These drive the real router and assert on status codes, headers, and
//! the decoded envelopes coming back over the wire.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use obmin_api::{AppState, create_router};
use obmin_core::currency::RateTable;
use obmin_soap::{BodyPayload, FaultCode, decode};

// ============================================================================
// Helpers
// ============================================================================

fn app() -> Router {
    let state = AppState {
        rates: Arc::new(RateTable::builtin()),
        wsdl_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../wsdl"),
    };
    create_router(state)
}

fn request_xml(amount: &str, from: &str, to: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ConvertCurrencyRequest>
      <amount>{amount}</amount>
      <fromCurrency>{from}</fromCurrency>
      <toCurrency>{to}</toCurrency>
    </ConvertCurrencyRequest>
  </soap:Body>
</soap:Envelope>"#
    )
}

fn soap_post(content_type: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/soap/convert-currency")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

async fn response_parts(response: axum::response::Response) -> (StatusCode, Option<String>, Vec<u8>) {
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, bytes.to_vec())
}

// ============================================================================
// Success paths
// ============================================================================

#[tokio::test]
async fn test_convert_uah_to_usd() {
    let request = soap_post("text/xml", request_xml("100", "UAH", "USD"));
    let response = app().oneshot(request).await.unwrap();
    let (status, content_type, body) = response_parts(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/xml"));

    match decode(&body).unwrap().into_payload() {
        BodyPayload::Response(converted) => {
            assert_eq!(converted.converted_amount, 2.5);
            assert_eq!(converted.rate, 0.025);
            assert_eq!(converted.from_currency.code(), "UAH");
            assert_eq!(converted.to_currency.code(), "USD");
        }
        other => panic!("expected response payload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_convert_usd_to_uah() {
    let request = soap_post("text/xml", request_xml("10", "USD", "UAH"));
    let response = app().oneshot(request).await.unwrap();
    let (status, _, body) = response_parts(response).await;

    assert_eq!(status, StatusCode::OK);
    match decode(&body).unwrap().into_payload() {
        BodyPayload::Response(converted) => {
            assert_eq!(converted.converted_amount, 400.0);
            assert_eq!(converted.rate, 40.0);
        }
        other => panic!("expected response payload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_convert_zero_amount() {
    let request = soap_post("text/xml", request_xml("0", "UAH", "USD"));
    let response = app().oneshot(request).await.unwrap();
    let (status, _, body) = response_parts(response).await;

    assert_eq!(status, StatusCode::OK);
    match decode(&body).unwrap().into_payload() {
        BodyPayload::Response(converted) => assert_eq!(converted.converted_amount, 0.0),
        other => panic!("expected response payload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_convert_negative_amount() {
    let request = soap_post("text/xml", request_xml("-4", "USD", "UAH"));
    let response = app().oneshot(request).await.unwrap();
    let (status, _, body) = response_parts(response).await;

    assert_eq!(status, StatusCode::OK);
    match decode(&body).unwrap().into_payload() {
        BodyPayload::Response(converted) => assert_eq!(converted.converted_amount, -160.0),
        other => panic!("expected response payload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_identical_requests_get_identical_responses() {
    let router = app();

    let first = router
        .clone()
        .oneshot(soap_post("text/xml", request_xml("100", "UAH", "USD")))
        .await
        .unwrap();
    let second = router
        .oneshot(soap_post("text/xml", request_xml("100", "UAH", "USD")))
        .await
        .unwrap();

    let (_, _, first_body) = response_parts(first).await;
    let (_, _, second_body) = response_parts(second).await;
    assert_eq!(first_body, second_body);
}

// ============================================================================
// Fault paths
// ============================================================================

async fn expect_client_fault(request: Request<Body>, message: &str) -> Option<String> {
    let response = app().oneshot(request).await.unwrap();
    let (status, content_type, body) = response_parts(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("text/xml"));

    match decode(&body).unwrap().into_payload() {
        BodyPayload::Fault(fault) => {
            assert_eq!(fault.code, FaultCode::Client);
            assert_eq!(fault.message, message);
            fault.detail
        }
        other => panic!("expected fault payload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejects_json_content_type() {
    let request = soap_post("application/json", request_xml("100", "UAH", "USD"));
    let detail = expect_client_fault(request, "Invalid Content-Type. Expected text/xml").await;
    assert_eq!(detail, None);
}

#[tokio::test]
async fn test_rejects_truncated_xml() {
    let xml = request_xml("100", "UAH", "USD");
    let truncated = xml[..xml.len() / 2].to_string();
    let request = soap_post("text/xml", truncated);
    let detail = expect_client_fault(request, "Failed to parse SOAP envelope").await;
    assert!(detail.is_some());
}

#[tokio::test]
async fn test_rejects_unsupported_pair() {
    let request = soap_post("text/xml", request_xml("100", "UAH", "JPY"));
    let detail = expect_client_fault(request, "Invalid currency pair").await;
    let detail = detail.expect("pair fault carries detail");
    assert!(detail.contains("UAH"));
    assert!(detail.contains("JPY"));
}

#[tokio::test]
async fn test_rejects_envelope_without_request() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>Client</faultcode>
      <faultstring>not a request</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;
    let request = soap_post("text/xml", xml.to_string());
    let detail = expect_client_fault(request, "Missing currency conversion request").await;
    assert_eq!(detail, None);
}

#[tokio::test]
async fn test_rejects_unknown_currency_code() {
    let request = soap_post("text/xml", request_xml("100", "XAU", "USD"));
    let detail = expect_client_fault(request, "Failed to parse SOAP envelope").await;
    assert!(detail.expect("parse fault carries detail").contains("XAU"));
}

// ============================================================================
// Transport-level rejection
// ============================================================================

#[tokio::test]
async fn test_get_is_method_not_allowed() {
    let request = Request::builder()
        .method("GET")
        .uri("/soap/convert-currency")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let (status, _, body) = response_parts(response).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body.is_empty());
}
