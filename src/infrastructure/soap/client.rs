use log::{debug, info, warn};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::domain::error::GatewayError;
use crate::domain::gateway::Exchange;
use crate::infrastructure::soap::envelope::{self, SoapParam};
use crate::infrastructure::soap::history::MessageHistory;
use crate::infrastructure::soap::wsdl::{self, ServiceDescription};
use crate::infrastructure::soap::xml_value;

/// SOAP 1.1 client bound to one WSDL-described service.
pub struct SoapClient {
	http_client: Client,
	service:     ServiceDescription,
	history:     MessageHistory,
}

impl SoapClient {
	pub fn new(http_client: Client, service: ServiceDescription) -> Self {
		Self {
			http_client,
			service,
			history: MessageHistory::new(),
		}
	}

	/// Downloads and resolves the WSDL at `wsdl_url`.
	pub async fn connect(
		http_client: Client,
		wsdl_url: &str,
	) -> Result<Self, GatewayError> {
		let service = wsdl::fetch(&http_client, wsdl_url).await?;
		info!(
			"Bound to {} ({} operations)",
			service.endpoint,
			service.operations.len()
		);
		Ok(Self::new(http_client, service))
	}

	pub fn service(&self) -> &ServiceDescription {
		&self.service
	}

	pub fn last_exchange(&self) -> Exchange {
		self.history.last()
	}

	/// Invokes `operation` and returns its `{operation}Result` node.
	pub async fn call(
		&self,
		operation: &str,
		params: &[SoapParam],
	) -> Result<Value, GatewayError> {
		if !self.service.supports(operation) {
			return Err(GatewayError::UnknownOperation {
				operation: operation.to_string(),
			});
		}

		let request = envelope::build_request(
			&self.service.target_namespace,
			operation,
			params,
		);
		self.history.record_sent(request.as_bytes());

		debug!("Calling {operation} at {}", self.service.endpoint);
		let response = self
			.http_client
			.post(&self.service.endpoint)
			.header(CONTENT_TYPE, "text/xml; charset=utf-8")
			.header("SOAPAction", self.service.soap_action(operation))
			.body(request)
			.send()
			.await?;

		let status = response.status();
		let body = response.bytes().await?;
		self.history.record_received(&body);
		let text = String::from_utf8_lossy(&body);

		if !status.is_success() {
			warn!("{operation} answered with HTTP {status}");
			if let Ok(document) = xml_value::decode(&text) &&
				let Some(fault) = envelope::find_fault(&document)
			{
				return Err(fault);
			}
			return Err(GatewayError::HttpStatus {
				status: status.as_u16(),
			});
		}

		let document = xml_value::decode(&text)?;
		envelope::extract_result(operation, &document)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;

	#[tokio::test]
	async fn test_call_rejects_operation_missing_from_wsdl() {
		let client = SoapClient::new(Client::new(), ServiceDescription {
			target_namespace: "https://turkpos.com.tr/".to_string(),
			endpoint:         "http://127.0.0.1:9/unreachable".to_string(),
			operations:       BTreeSet::from(["Pos_Odeme".to_string()]),
		});

		let result = client.call("KS_Kart_Sil", &[]).await;

		assert_eq!(
			result.unwrap_err(),
			GatewayError::UnknownOperation {
				operation: "KS_Kart_Sil".to_string(),
			}
		);
		assert!(client.last_exchange().is_empty());
	}
}
