use quick_xml::escape::escape;
use serde_json::Value;

use crate::domain::error::GatewayError;

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// A request parameter: either text or a nested block of parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum SoapValue {
	Text(String),
	Struct(Vec<SoapParam>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoapParam {
	pub name:  String,
	pub value: SoapValue,
}

impl SoapParam {
	pub fn text(name: &str, value: impl ToString) -> Self {
		Self {
			name:  name.to_string(),
			value: SoapValue::Text(value.to_string()),
		}
	}

	/// An element that is sent but left empty.
	pub fn empty(name: &str) -> Self {
		Self::text(name, "")
	}

	pub fn optional(name: &str, value: Option<impl ToString>) -> Self {
		match value {
			Some(value) => Self::text(name, value),
			None => Self::empty(name),
		}
	}

	pub fn block(name: &str, params: Vec<SoapParam>) -> Self {
		Self {
			name:  name.to_string(),
			value: SoapValue::Struct(params),
		}
	}
}

fn write_params(xml: &mut String, params: &[SoapParam]) {
	for param in params {
		match &param.value {
			SoapValue::Text(text) if text.is_empty() => {
				xml.push_str(&format!("<{}/>", param.name));
			}
			SoapValue::Text(text) => {
				let text = escape(text.as_str());
				xml.push_str(&format!("<{0}>{text}</{0}>", param.name));
			}
			SoapValue::Struct(children) => {
				xml.push_str(&format!("<{}>", param.name));
				write_params(xml, children);
				xml.push_str(&format!("</{}>", param.name));
			}
		}
	}
}

/// Builds a SOAP 1.1 request envelope for `operation` in `namespace`.
pub fn build_request(
	namespace: &str,
	operation: &str,
	params: &[SoapParam],
) -> String {
	let mut xml = String::from(r#"<?xml version="1.0" encoding="utf-8"?>"#);
	xml.push_str(&format!(
		r#"<soap:Envelope xmlns:soap="{SOAP_ENVELOPE_NS}"><soap:Body>"#
	));
	xml.push_str(&format!(
		r#"<{operation} xmlns="{}">"#,
		escape(namespace)
	));
	write_params(&mut xml, params);
	xml.push_str(&format!("</{operation}>"));
	xml.push_str("</soap:Body></soap:Envelope>");
	xml
}

/// Picks `{operation}Response/{operation}Result` out of a decoded response
/// envelope, turning SOAP faults into errors.
pub fn extract_result(
	operation: &str,
	envelope: &Value,
) -> Result<Value, GatewayError> {
	let body = envelope
		.get("Envelope")
		.and_then(|envelope| envelope.get("Body"))
		.ok_or_else(|| GatewayError::malformed(operation, "missing SOAP body"))?;

	if let Some(fault) = body.get("Fault") {
		return Err(decode_fault(fault));
	}

	let response = body
		.get(format!("{operation}Response"))
		.ok_or_else(|| {
			GatewayError::malformed(operation, format!("missing {operation}Response"))
		})?;

	match response.get(format!("{operation}Result")) {
		Some(result) if !result.is_null() => Ok(result.clone()),
		_ => Err(GatewayError::malformed(
			operation,
			format!("missing {operation}Result"),
		)),
	}
}

pub fn find_fault(envelope: &Value) -> Option<GatewayError> {
	envelope
		.get("Envelope")
		.and_then(|envelope| envelope.get("Body"))
		.and_then(|body| body.get("Fault"))
		.map(decode_fault)
}

// SOAP 1.1 uses faultcode/faultstring, SOAP 1.2 Code/Value and Reason/Text.
fn decode_fault(fault: &Value) -> GatewayError {
	let text = |value: Option<&Value>| {
		value
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string()
	};

	let code = text(
		fault
			.get("faultcode")
			.or_else(|| fault.get("Code").and_then(|code| code.get("Value"))),
	);
	let message = text(
		fault
			.get("faultstring")
			.or_else(|| fault.get("Reason").and_then(|reason| reason.get("Text"))),
	);

	GatewayError::Fault { code, message }
}
