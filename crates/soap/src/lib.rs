//! SOAP 1.1 envelope processing for the currency-conversion service.
//!
//! This crate provides:
//! - The typed envelope model (`Envelope` → `Body` → one payload)
//! - A strict XML codec over quick-xml (`decode` / `encode`)
//! - The request validator that gates decoded input behind typed Faults

pub mod codec;
pub mod envelope;
pub mod error;
pub mod validator;

pub use codec::{decode, encode};
pub use envelope::{
    Body, BodyPayload, ConversionRequest, ConversionResponse, Envelope, Fault, FaultCode,
    SOAP_ENVELOPE_NS,
};
pub use error::{DecodeError, EncodeError};
pub use validator::{RequestValidator, TEXT_XML};
