use derive_more::derive::{Display, Error};

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum GatewayError {
	#[display("Could not reach the gateway: {message}")]
	Transport { message: String },
	#[display("Gateway answered with HTTP status {status}")]
	HttpStatus { status: u16 },
	#[display("Gateway raised a SOAP fault [{code}]: {message}")]
	Fault { code: String, message: String },
	#[display("Unexpected response for {operation}: {message}")]
	MalformedResponse { operation: String, message: String },
	#[display("Invalid XML document: {message}")]
	InvalidXml { message: String },
	#[display("Operation {operation} is not described by the service WSDL")]
	UnknownOperation { operation: String },
	#[display("Could not resolve the service description: {message}")]
	Wsdl { message: String },
}

impl GatewayError {
	pub fn name(&self) -> &'static str {
		match self {
			GatewayError::Transport { .. } => "Transport",
			GatewayError::HttpStatus { .. } => "HTTP Status",
			GatewayError::Fault { .. } => "SOAP Fault",
			GatewayError::MalformedResponse { .. } => "Malformed Response",
			GatewayError::InvalidXml { .. } => "Invalid XML",
			GatewayError::UnknownOperation { .. } => "Unknown Operation",
			GatewayError::Wsdl { .. } => "WSDL",
		}
	}

	pub fn malformed(operation: &str, message: impl Into<String>) -> Self {
		GatewayError::MalformedResponse {
			operation: operation.to_string(),
			message:   message.into(),
		}
	}
}

impl From<reqwest::Error> for GatewayError {
	fn from(err: reqwest::Error) -> Self {
		match err.status() {
			Some(status) => GatewayError::HttpStatus {
				status: status.as_u16(),
			},
			None => GatewayError::Transport {
				message: err.to_string(),
			},
		}
	}
}

impl From<quick_xml::Error> for GatewayError {
	fn from(err: quick_xml::Error) -> Self {
		GatewayError::InvalidXml {
			message: err.to_string(),
		}
	}
}

impl From<quick_xml::events::attributes::AttrError> for GatewayError {
	fn from(err: quick_xml::events::attributes::AttrError) -> Self {
		GatewayError::InvalidXml {
			message: err.to_string(),
		}
	}
}
