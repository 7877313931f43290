//! XML codec for the SOAP envelope model.
//!
//! Decoding is strict: the document must be rooted at a namespaced SOAP
//! Envelope holding one Body with exactly one schema-known payload, and
//! payload fields must parse into their typed form. There is no
//! loosely-typed intermediate shape.
//!
//! quick-xml does not expand external entities, which keeps the decoder
//! safe against XXE without extra handling.

use std::io;
use std::str::FromStr;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};

use obmin_shared::Currency;

use crate::envelope::{
    Body, BodyPayload, ConversionRequest, ConversionResponse, Envelope, Fault, FaultCode,
    SOAP_ENVELOPE_NS,
};
use crate::error::{DecodeError, EncodeError};

/// Decodes raw bytes into a typed [`Envelope`].
///
/// The Envelope and Body elements must resolve to the SOAP 1.1 envelope
/// namespace; the payload is selected by element local name alone.
pub fn decode(bytes: &[u8]) -> Result<Envelope, DecodeError> {
    let xml = std::str::from_utf8(bytes)?;
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut saw_envelope = false;
    let mut saw_body = false;
    let mut in_body = false;
    let mut payload: Option<BodyPayload> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_resolved_event()? {
            (resolution, Event::Start(start)) => {
                if depth == 0 {
                    if !is_soap(&resolution, &start, b"Envelope") {
                        return Err(DecodeError::MissingEnvelope);
                    }
                    saw_envelope = true;
                    depth = 1;
                } else if depth == 1 && is_soap(&resolution, &start, b"Body") {
                    saw_body = true;
                    in_body = true;
                    depth = 2;
                } else if depth == 2 && in_body {
                    if payload.is_some() {
                        return Err(DecodeError::ExtraPayload);
                    }
                    // read_fields consumes through the payload's end tag,
                    // so depth is unchanged afterwards.
                    let kind = payload_kind(start.local_name().as_ref())?;
                    let fields = read_fields(&mut reader)?;
                    payload = Some(build_payload(kind, &fields)?);
                } else {
                    // Header content or other subtrees we do not model.
                    depth += 1;
                }
            }
            (resolution, Event::Empty(start)) => {
                if depth == 0 {
                    if !is_soap(&resolution, &start, b"Envelope") {
                        return Err(DecodeError::MissingEnvelope);
                    }
                    saw_envelope = true;
                } else if depth == 1 && is_soap(&resolution, &start, b"Body") {
                    saw_body = true;
                } else if depth == 2 && in_body {
                    if payload.is_some() {
                        return Err(DecodeError::ExtraPayload);
                    }
                    let kind = payload_kind(start.local_name().as_ref())?;
                    payload = Some(build_payload(kind, &[])?);
                }
            }
            (_, Event::End(_)) => {
                depth = depth.saturating_sub(1);
                if depth <= 1 {
                    in_body = false;
                }
                if depth == 0 {
                    break;
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    if !saw_envelope {
        return Err(DecodeError::MissingEnvelope);
    }
    if !saw_body {
        return Err(DecodeError::MissingBody);
    }
    let payload = payload.ok_or(DecodeError::EmptyBody)?;
    Ok(Envelope {
        body: Body { payload },
    })
}

/// Encodes an [`Envelope`] as an XML declaration followed by an indented
/// document. Exactly the one populated payload variant is emitted; the
/// fault `detail` element is omitted when absent.
pub fn encode(envelope: &Envelope) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("soap:Envelope");
    root.push_attribute(("xmlns:soap", SOAP_ENVELOPE_NS));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new("soap:Body")))?;

    match &envelope.body.payload {
        BodyPayload::Request(request) => write_request(&mut writer, request)?,
        BodyPayload::Response(response) => write_response(&mut writer, response)?,
        BodyPayload::Fault(fault) => write_fault(&mut writer, fault)?,
    }

    writer.write_event(Event::End(BytesEnd::new("soap:Body")))?;
    writer.write_event(Event::End(BytesEnd::new("soap:Envelope")))?;
    Ok(writer.into_inner())
}

fn is_soap(resolution: &ResolveResult<'_>, start: &BytesStart<'_>, local: &[u8]) -> bool {
    matches!(resolution, ResolveResult::Bound(Namespace(ns)) if *ns == SOAP_ENVELOPE_NS.as_bytes())
        && start.local_name().as_ref() == local
}

#[derive(Clone, Copy)]
enum PayloadKind {
    Request,
    Response,
    Fault,
}

fn payload_kind(local: &[u8]) -> Result<PayloadKind, DecodeError> {
    match local {
        b"ConvertCurrencyRequest" => Ok(PayloadKind::Request),
        b"ConvertCurrencyResponse" => Ok(PayloadKind::Response),
        b"Fault" => Ok(PayloadKind::Fault),
        other => Err(DecodeError::UnknownPayload(
            String::from_utf8_lossy(other).into_owned(),
        )),
    }
}

/// Collects the payload's direct children as `(local name, text)` pairs,
/// consuming events through the payload element's own end tag.
fn read_fields(reader: &mut NsReader<&[u8]>) -> Result<Vec<(String, String)>, DecodeError> {
    let mut fields = Vec::new();
    let mut current: Option<(String, String)> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_resolved_event()? {
            (_, Event::Start(start)) => {
                if depth == 0 {
                    current = Some((
                        String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
                        String::new(),
                    ));
                }
                depth += 1;
            }
            (_, Event::Empty(start)) => {
                if depth == 0 {
                    fields.push((
                        String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
                        String::new(),
                    ));
                }
            }
            (_, Event::Text(text)) => {
                if depth == 1
                    && let Some((_, value)) = current.as_mut()
                {
                    value.push_str(&text.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            (_, Event::End(_)) => {
                if depth == 0 {
                    // The payload element's own end tag.
                    break;
                }
                depth -= 1;
                if depth == 0
                    && let Some(field) = current.take()
                {
                    fields.push(field);
                }
            }
            (_, Event::Eof) => return Err(DecodeError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(fields)
}

fn build_payload(
    kind: PayloadKind,
    fields: &[(String, String)],
) -> Result<BodyPayload, DecodeError> {
    match kind {
        PayloadKind::Request => Ok(BodyPayload::Request(ConversionRequest {
            amount: number_field(fields, "amount")?,
            from_currency: currency_field(fields, "fromCurrency")?,
            to_currency: currency_field(fields, "toCurrency")?,
        })),
        PayloadKind::Response => Ok(BodyPayload::Response(ConversionResponse {
            converted_amount: number_field(fields, "convertedAmount")?,
            from_currency: currency_field(fields, "fromCurrency")?,
            to_currency: currency_field(fields, "toCurrency")?,
            rate: number_field(fields, "rate")?,
        })),
        PayloadKind::Fault => Ok(BodyPayload::Fault(build_fault(fields)?)),
    }
}

fn build_fault(fields: &[(String, String)]) -> Result<Fault, DecodeError> {
    let code_text = text_field(fields, "faultcode")?.trim();
    // faultcode is a QName on the wire; only the local part carries blame.
    let code = match code_text.rsplit(':').next().unwrap_or(code_text) {
        "Client" => FaultCode::Client,
        "Server" => FaultCode::Server,
        _ => return Err(DecodeError::InvalidFaultCode(code_text.to_string())),
    };
    let message = text_field(fields, "faultstring")?.to_string();
    let detail = fields
        .iter()
        .find(|(name, _)| name == "detail")
        .map(|(_, value)| value.clone());
    Ok(Fault {
        code,
        message,
        detail,
    })
}

fn text_field<'a>(
    fields: &'a [(String, String)],
    name: &'static str,
) -> Result<&'a str, DecodeError> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .ok_or(DecodeError::MissingField(name))
}

fn number_field(fields: &[(String, String)], name: &'static str) -> Result<f64, DecodeError> {
    let text = text_field(fields, name)?.trim();
    let value: f64 = text.parse().map_err(|_| DecodeError::InvalidNumber {
        field: name,
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(DecodeError::InvalidNumber {
            field: name,
            value: text.to_string(),
        });
    }
    Ok(value)
}

fn currency_field(
    fields: &[(String, String)],
    name: &'static str,
) -> Result<Currency, DecodeError> {
    let text = text_field(fields, name)?.trim();
    Currency::from_str(text).map_err(|_| DecodeError::UnknownCurrency {
        field: name,
        code: text.to_string(),
    })
}

fn write_request(writer: &mut Writer<Vec<u8>>, request: &ConversionRequest) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("ConvertCurrencyRequest")))?;
    write_text_element(writer, "amount", &format_number(request.amount))?;
    write_text_element(writer, "fromCurrency", request.from_currency.code())?;
    write_text_element(writer, "toCurrency", request.to_currency.code())?;
    writer.write_event(Event::End(BytesEnd::new("ConvertCurrencyRequest")))
}

fn write_response(writer: &mut Writer<Vec<u8>>, response: &ConversionResponse) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("ConvertCurrencyResponse")))?;
    write_text_element(
        writer,
        "convertedAmount",
        &format_number(response.converted_amount),
    )?;
    write_text_element(writer, "fromCurrency", response.from_currency.code())?;
    write_text_element(writer, "toCurrency", response.to_currency.code())?;
    write_text_element(writer, "rate", &format_number(response.rate))?;
    writer.write_event(Event::End(BytesEnd::new("ConvertCurrencyResponse")))
}

fn write_fault(writer: &mut Writer<Vec<u8>>, fault: &Fault) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("soap:Fault")))?;
    write_text_element(writer, "faultcode", fault.code.as_str())?;
    write_text_element(writer, "faultstring", &fault.message)?;
    if let Some(detail) = &fault.detail {
        write_text_element(writer, "detail", detail)?;
    }
    writer.write_event(Event::End(BytesEnd::new("soap:Fault")))
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}

fn format_number(value: f64) -> String {
    format!("{value}")
}
