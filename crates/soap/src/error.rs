//! Error types for the SOAP codec.

use thiserror::Error;

/// Failures turning raw bytes into a typed [`Envelope`](crate::Envelope).
///
/// Every variant is a codec-level rejection; the validator maps all of
/// them to the same "Failed to parse SOAP envelope" Client fault with the
/// variant's message as detail.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid UTF-8.
    #[error("invalid UTF-8 in request body: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The body is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is not rooted at a SOAP Envelope element.
    #[error("document is not rooted at a SOAP Envelope")]
    MissingEnvelope,

    /// The Envelope has no Body element.
    #[error("SOAP Envelope contains no Body element")]
    MissingBody,

    /// The Body has no payload element at all.
    #[error("SOAP Body contains no payload element")]
    EmptyBody,

    /// The Body has more than one payload element.
    #[error("SOAP Body contains more than one payload element")]
    ExtraPayload,

    /// The Body's payload element is not part of the schema.
    #[error("unrecognized payload element <{0}>")]
    UnknownPayload(String),

    /// A required child element of the payload is absent.
    #[error("missing required element <{0}>")]
    MissingField(&'static str),

    /// A numeric field failed to parse or is not finite.
    #[error("invalid numeric value {value:?} in <{field}>")]
    InvalidNumber {
        /// Element the value was read from.
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// A currency field holds a code the service does not know.
    #[error("unknown currency code {code:?} in <{field}>")]
    UnknownCurrency {
        /// Element the code was read from.
        field: &'static str,
        /// The offending code.
        code: String,
    },

    /// A faultcode value outside {Client, Server}.
    #[error("invalid fault code {0:?}")]
    InvalidFaultCode(String),

    /// The document ended inside an open element.
    #[error("unexpected end of document")]
    UnexpectedEof,
}

/// Failures serializing an [`Envelope`](crate::Envelope) to bytes.
///
/// Encoding a structurally valid envelope into memory cannot realistically
/// fail; this exists so the handler has a typed Server-fault path instead
/// of a panic.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The underlying writer failed.
    #[error("XML write error: {0}")]
    Io(#[from] std::io::Error),
}
