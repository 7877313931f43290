//! The typed SOAP envelope model.
//!
//! A `Body` holds exactly one payload. Modeling the payload as an enum
//! makes the "never two, never zero" envelope invariant hold by
//! construction instead of by convention.

use obmin_shared::Currency;

/// The SOAP 1.1 envelope namespace URI.
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Top-level SOAP wrapper containing one Body.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// The single Body of this envelope.
    pub body: Body,
}

impl Envelope {
    /// Wraps a conversion request in an envelope.
    #[must_use]
    pub const fn request(request: ConversionRequest) -> Self {
        Self {
            body: Body {
                payload: BodyPayload::Request(request),
            },
        }
    }

    /// Wraps a conversion response in an envelope.
    #[must_use]
    pub const fn response(response: ConversionResponse) -> Self {
        Self {
            body: Body {
                payload: BodyPayload::Response(response),
            },
        }
    }

    /// Wraps a fault in an envelope.
    #[must_use]
    pub const fn fault(fault: Fault) -> Self {
        Self {
            body: Body {
                payload: BodyPayload::Fault(fault),
            },
        }
    }

    /// Consumes the envelope and returns its payload.
    #[must_use]
    pub fn into_payload(self) -> BodyPayload {
        self.body.payload
    }
}

/// The SOAP Body.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// The one payload this body carries.
    pub payload: BodyPayload,
}

/// Exactly one of the payloads a Body can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyPayload {
    /// An inbound `ConvertCurrencyRequest`.
    Request(ConversionRequest),
    /// An outbound `ConvertCurrencyResponse`.
    Response(ConversionResponse),
    /// A fault, inbound or outbound.
    Fault(Fault),
}

/// A currency conversion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    /// Amount to convert. Finite after decode; sign is unrestricted.
    pub amount: f64,
    /// Source currency.
    pub from_currency: Currency,
    /// Target currency.
    pub to_currency: Currency,
}

/// A currency conversion response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResponse {
    /// `amount * rate`.
    pub converted_amount: f64,
    /// Source currency, echoed from the request.
    pub from_currency: Currency,
    /// Target currency, echoed from the request.
    pub to_currency: Currency,
    /// Rate used for the conversion.
    pub rate: f64,
}

/// SOAP's standard error-carrying payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Blame indicator: client or server.
    pub code: FaultCode,
    /// Human-readable fault description.
    pub message: String,
    /// Optional underlying error text.
    pub detail: Option<String>,
}

impl Fault {
    /// Creates a Client fault.
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            code: FaultCode::Client,
            message: message.into(),
            detail: None,
        }
    }

    /// Creates a Server fault.
    pub fn server(message: impl Into<String>) -> Self {
        Self {
            code: FaultCode::Server,
            message: message.into(),
            detail: None,
        }
    }

    /// Attaches detail text to this fault.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns the HTTP status code this fault maps to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

/// The SOAP 1.1 fault code, restricted to the blame axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    /// The caller sent something unacceptable.
    Client,
    /// The service failed to process an acceptable request.
    Server,
}

impl FaultCode {
    /// Returns the wire spelling of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Server => "Server",
        }
    }

    /// Returns the HTTP status code for this fault code.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Client => 400,
            Self::Server => 500,
        }
    }
}

impl std::fmt::Display for FaultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_status_codes() {
        assert_eq!(Fault::client("bad").status_code(), 400);
        assert_eq!(Fault::server("broken").status_code(), 500);
    }

    #[test]
    fn test_fault_detail_is_optional() {
        let bare = Fault::client("bad");
        assert_eq!(bare.detail, None);

        let detailed = Fault::client("bad").with_detail("because");
        assert_eq!(detailed.detail.as_deref(), Some("because"));
    }

    #[test]
    fn test_envelope_constructors_pick_the_right_variant() {
        let envelope = Envelope::fault(Fault::server("broken"));
        assert!(matches!(envelope.body.payload, BodyPayload::Fault(_)));

        let envelope = Envelope::request(ConversionRequest {
            amount: 1.0,
            from_currency: obmin_shared::Currency::Usd,
            to_currency: obmin_shared::Currency::Uah,
        });
        assert!(matches!(envelope.body.payload, BodyPayload::Request(_)));
    }
}
