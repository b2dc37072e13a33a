use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use time::UtcOffset;

use crate::domain::merchant::{Card, Credentials, MerchantIdentity};
use crate::infrastructure::soap::turkpos_gateway::{
	DEFAULT_REFUND_MODE, TerminalSettings,
};

// Public test-environment identity published by the gateway provider.
pub const DEFAULT_WSDL_URL: &str =
	"https://testposws.param.com.tr/turkpos.ws/service_turkpos_prod.asmx?wsdl";
pub const DEFAULT_CLIENT_CODE: &str = "10738";
pub const DEFAULT_CLIENT_USERNAME: &str = "Test";
pub const DEFAULT_CLIENT_PASSWORD: &str = "Test";
pub const DEFAULT_GUID: &str = "0c13d406-873b-403b-9c09-a5766840d98c";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub wsdl_url:             String,
	pub client_code:          String,
	pub client_username:      String,
	pub client_password:      String,
	pub guid:                 String,
	pub success_url:          String,
	pub failure_url:          String,
	pub client_ip:            String,
	pub ref_url:              String,
	pub card_number:          String,
	pub card_expiry_month:    String,
	pub card_expiry_year:     String,
	pub card_cvc:             String,
	pub card_holder:          String,
	pub card_holder_phone:    String,
	pub installments:         u32,
	pub payment_amount:       Decimal,
	pub refund_amount:        Decimal,
	pub refund_mode:          String,
	pub stored_charge_amount: Decimal,
	pub order_prefix:         String,
	pub stored_order_prefix:  String,
	pub request_timeout_secs: u64,
	pub utc_offset_hours:     i8,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.set_default("wsdl_url", DEFAULT_WSDL_URL)?
			.set_default("client_code", DEFAULT_CLIENT_CODE)?
			.set_default("client_username", DEFAULT_CLIENT_USERNAME)?
			.set_default("client_password", DEFAULT_CLIENT_PASSWORD)?
			.set_default("guid", DEFAULT_GUID)?
			.set_default("success_url", "https://example.com/basarili")?
			.set_default("failure_url", "https://example.com/hata")?
			.set_default("client_ip", "1.2.3.4")?
			.set_default("ref_url", "https://example.com")?
			.set_default("card_number", "4546711234567894")?
			.set_default("card_expiry_month", "12")?
			.set_default("card_expiry_year", "2026")?
			.set_default("card_cvc", "000")?
			.set_default("card_holder", "TEST KART")?
			.set_default("card_holder_phone", "5555555555")?
			.set_default("installments", 1)?
			.set_default("payment_amount", "100.00")?
			.set_default("refund_amount", "50.00")?
			.set_default("refund_mode", DEFAULT_REFUND_MODE)?
			.set_default("stored_charge_amount", "75.00")?
			.set_default("order_prefix", "POS-TEST")?
			.set_default("stored_order_prefix", "KS-TEST")?
			.set_default("request_timeout_secs", 30)?
			.set_default("utc_offset_hours", 3)?
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}

	pub fn credentials(&self) -> Credentials {
		Credentials {
			client_code: self.client_code.clone(),
			username:    self.client_username.clone(),
			password:    self.client_password.clone(),
		}
	}

	pub fn merchant(&self) -> MerchantIdentity {
		MerchantIdentity::new(self.client_code.clone(), self.guid.clone())
	}

	pub fn card(&self) -> Card {
		Card {
			number:       self.card_number.clone(),
			expiry_month: self.card_expiry_month.clone(),
			expiry_year:  self.card_expiry_year.clone(),
			cvc:          self.card_cvc.clone(),
			holder_name:  self.card_holder.clone(),
			holder_phone: self.card_holder_phone.clone(),
		}
	}

	pub fn terminal(&self) -> TerminalSettings {
		TerminalSettings {
			guid:        self.guid.clone(),
			client_ip:   self.client_ip.clone(),
			ref_url:     self.ref_url.clone(),
			refund_mode: self.refund_mode.clone(),
		}
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	pub fn utc_offset(&self) -> UtcOffset {
		UtcOffset::from_hms(self.utc_offset_hours, 0, 0).unwrap_or(UtcOffset::UTC)
	}
}
