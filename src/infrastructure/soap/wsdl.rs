use std::collections::BTreeSet;

use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use reqwest::Client;

use crate::domain::error::GatewayError;

/// What the client needs from a WSDL document to call the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescription {
	pub target_namespace: String,
	pub endpoint:         String,
	pub operations:       BTreeSet<String>,
}

impl ServiceDescription {
	pub fn supports(&self, operation: &str) -> bool {
		self.operations.contains(operation)
	}

	/// SOAP 1.1 action header value for `operation`.
	pub fn soap_action(&self, operation: &str) -> String {
		format!("\"{}{operation}\"", self.target_namespace)
	}
}

fn attribute(
	element: &BytesStart<'_>,
	name: &[u8],
) -> Result<Option<String>, GatewayError> {
	for attr in element.attributes() {
		let attr = attr?;
		if attr.key.local_name().as_ref() == name {
			return Ok(Some(attr.unescape_value()?.into_owned()));
		}
	}
	Ok(None)
}

fn wsdl_error(message: &str) -> GatewayError {
	GatewayError::Wsdl {
		message: message.to_string(),
	}
}

pub fn parse(document: &str) -> Result<ServiceDescription, GatewayError> {
	let mut reader = Reader::from_str(document);
	reader.config_mut().trim_text(true);

	let mut target_namespace = None;
	let mut endpoint = None;
	let mut operations = BTreeSet::new();
	let mut path: Vec<Vec<u8>> = Vec::new();

	loop {
		let event = reader.read_event()?;
		let (element, is_empty) = match &event {
			Event::Start(element) => (element, false),
			Event::Empty(element) => (element, true),
			Event::End(_) => {
				path.pop();
				continue;
			}
			Event::Eof => break,
			_ => continue,
		};

		let name = element.local_name().as_ref().to_vec();
		let parent = path.last().map(Vec::as_slice);

		match (name.as_slice(), parent) {
			(b"definitions", None) => {
				target_namespace = attribute(element, b"targetNamespace")?;
			}
			(b"operation", Some(b"portType")) => {
				if let Some(operation) = attribute(element, b"name")? {
					operations.insert(operation);
				}
			}
			// soap:address and soap12:address both live under wsdl:port
			(b"address", Some(b"port")) if endpoint.is_none() => {
				endpoint = attribute(element, b"location")?;
			}
			_ => {}
		}

		if !is_empty {
			path.push(name);
		}
	}

	let description = ServiceDescription {
		target_namespace: target_namespace
			.ok_or_else(|| wsdl_error("definitions carry no targetNamespace"))?,
		endpoint:         endpoint
			.ok_or_else(|| wsdl_error("no service port address"))?,
		operations,
	};

	if description.operations.is_empty() {
		return Err(wsdl_error("no operations declared"));
	}

	Ok(description)
}

pub async fn fetch(
	http_client: &Client,
	wsdl_url: &str,
) -> Result<ServiceDescription, GatewayError> {
	let response = http_client.get(wsdl_url).send().await?;
	if !response.status().is_success() {
		return Err(GatewayError::HttpStatus {
			status: response.status().as_u16(),
		});
	}

	let document = response.text().await?;
	let description = parse(&document)?;
	debug!(
		"Resolved service at {} with {} operations",
		description.endpoint,
		description.operations.len()
	);
	Ok(description)
}
