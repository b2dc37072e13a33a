use std::sync::Arc;

use log::{error, info};
use reqwest::Client;

use crate::adapters::console;
use crate::config::Config;
use crate::domain::error::GatewayError;
use crate::domain::gateway::PaymentGateway;
use crate::infrastructure::soap::client::SoapClient;
use crate::infrastructure::soap::turkpos_gateway::TurkPosGateway;
use crate::use_cases::report::SmokeReport;
use crate::use_cases::smoke_run::{SmokeRun, SmokeSettings};

pub mod config;

pub mod domain {
	pub mod error;
	pub mod gateway;
	pub mod merchant;
	pub mod order;
	pub mod reconciliation;
	pub mod signature;
	pub mod stored_card;
}

pub mod use_cases {
	pub mod charge_stored_card;
	pub mod delete_stored_card;
	pub mod dto;
	pub mod list_stored_cards;
	pub mod make_payment;
	pub mod reconciliation_summary;
	pub mod refund_payment;
	pub mod report;
	pub mod smoke_run;
	pub mod store_card;
}

pub mod infrastructure {
	pub mod soap {
		pub mod client;
		pub mod envelope;
		pub mod history;
		pub mod turkpos_gateway;
		pub mod wsdl;
		pub mod xml_value;
	}
}

pub mod adapters {
	pub mod console {
		pub mod diagnostics;
		pub mod report;
	}
}

/// Binds to the configured service, runs every step and prints the report
/// followed by the last exchanged envelopes.
pub async fn run(config: Arc<Config>) -> Result<SmokeReport, GatewayError> {
	env_logger::init();

	let http_client = Client::builder()
		.timeout(config.request_timeout())
		.build()?;

	info!("Resolving service description from {}", config.wsdl_url);
	let client = match SoapClient::connect(http_client, &config.wsdl_url).await {
		Ok(client) => Arc::new(client),
		Err(e) => {
			error!("Could not bind to the payment gateway: {e}");
			return Err(e);
		}
	};

	let gateway =
		TurkPosGateway::new(client, config.credentials(), config.terminal());

	let report = SmokeRun::new(gateway.clone(), SmokeSettings::from_config(&config))
		.execute()
		.await;

	console::report::print(&report);
	console::diagnostics::print(&gateway.last_exchange());

	Ok(report)
}
