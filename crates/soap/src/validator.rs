//! Request validation for the conversion endpoint.
//!
//! The validator gates a raw inbound request before anything reaches the
//! conversion engine. Checks run in a fixed order and the first failure
//! wins; every failure is a typed Client [`Fault`], carried as a value.

use obmin_core::currency::RateTable;

use crate::codec::decode;
use crate::envelope::{BodyPayload, ConversionRequest, Fault};

/// The only content type the conversion endpoint accepts.
pub const TEXT_XML: &str = "text/xml";

/// Validates inbound conversion requests against the rate table.
pub struct RequestValidator<'a> {
    rates: &'a RateTable,
}

impl<'a> RequestValidator<'a> {
    /// Creates a validator over the given rate table.
    #[must_use]
    pub const fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Runs the full check sequence over a raw inbound request.
    ///
    /// `content_type` is the transport's Content-Type header, if any;
    /// `body` is the outcome of reading the request body. Returns the
    /// typed request, or the fault describing exactly which rule failed:
    ///
    /// 1. Content-Type must equal `text/xml`
    /// 2. The body must have been readable
    /// 3. The body must decode into a SOAP envelope
    /// 4. The envelope's payload must be a conversion request
    /// 5. The currency pair must be in the rate table (ordered lookup)
    pub fn validate(
        &self,
        content_type: Option<&str>,
        body: Result<&[u8], String>,
    ) -> Result<ConversionRequest, Fault> {
        check_content_type(content_type)?;

        let bytes =
            body.map_err(|err| Fault::client("Failed to read request body").with_detail(err))?;

        let envelope = decode(bytes)
            .map_err(|err| Fault::client("Failed to parse SOAP envelope").with_detail(err.to_string()))?;

        let request = match envelope.into_payload() {
            BodyPayload::Request(request) => request,
            BodyPayload::Response(_) | BodyPayload::Fault(_) => {
                return Err(Fault::client("Missing currency conversion request"));
            }
        };

        if !self
            .rates
            .supports(request.from_currency, request.to_currency)
        {
            return Err(Fault::client("Invalid currency pair").with_detail(format!(
                "Conversion from {} to {} is not supported",
                request.from_currency, request.to_currency
            )));
        }

        Ok(request)
    }
}

fn check_content_type(content_type: Option<&str>) -> Result<(), Fault> {
    match content_type {
        Some(value) if value.trim() == TEXT_XML => Ok(()),
        _ => Err(Fault::client("Invalid Content-Type. Expected text/xml")),
    }
}
