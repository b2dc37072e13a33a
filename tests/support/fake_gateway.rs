use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal_macros::dec;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use time::UtcOffset;
use turkpos_smoke::domain::error::GatewayError;
use turkpos_smoke::domain::gateway::{
	DeleteStoredCardRequest, GatewayStatus, ListStoredCardsRequest,
	PaymentGateway, PaymentRequest, PaymentResult, ReconciliationRequest,
	ReconciliationSummary, RefundRequest, StoreCardRequest, StoreCardResult,
	StoredCardChargeRequest, StoredCardList,
};
use turkpos_smoke::domain::merchant::{Card, MerchantIdentity};
use turkpos_smoke::domain::stored_card::parse_card_list;
use turkpos_smoke::use_cases::dto::RedirectUrls;
use turkpos_smoke::use_cases::smoke_run::SmokeSettings;

#[derive(Debug, Clone)]
pub enum Call {
	Pay(PaymentRequest),
	Refund(RefundRequest),
	StoreCard(StoreCardRequest),
	Charge(StoredCardChargeRequest),
	List(ListStoredCardsRequest),
	Delete(DeleteStoredCardRequest),
	Reconcile(ReconciliationRequest),
}

/// Gateway answers, as the decoded `{operation}Result` node or an error.
#[derive(Debug, Clone)]
pub struct Script {
	pub pay:            Result<Value, GatewayError>,
	pub refund:         Result<Value, GatewayError>,
	pub store:          Result<Value, GatewayError>,
	pub charge:         Result<Value, GatewayError>,
	pub list:           Result<Value, GatewayError>,
	pub delete:         Result<Value, GatewayError>,
	pub reconciliation: Result<Value, GatewayError>,
}

pub fn card_record(guid: &str) -> Value {
	json!({
		"ID": "1",
		"KK_GUID": guid,
		"Tarih": "2026-10-17T09:00:00+03:00",
		"KK_No": "454671******7894",
		"KK_Banka": "Test Bank",
		"KK_Marka": "VISA",
		"KK_Tip": "Credit",
		"KK_Son4": "7894"
	})
}

impl Default for Script {
	fn default() -> Self {
		Self {
			pay:            Ok(json!({
				"Sonuc": "1",
				"Sonuc_Str": "Islem Basarili",
				"Islem_ID": "ABC123"
			})),
			refund:         Ok(json!({ "Sonuc": "1", "Sonuc_Str": "OK" })),
			store:          Ok(json!({
				"Sonuc": "1",
				"Sonuc_Str": "Basarili",
				"GUID": "ks-guid-1"
			})),
			charge:         Ok(json!({ "Sonuc": "1", "Islem_ID": "KS-777" })),
			list:           Ok(json!({
				"Sonuc": "1",
				"DT_Bilgi": { "Temp": [card_record("ks-guid-1")] }
			})),
			delete:         Ok(json!({ "Sonuc": "1" })),
			reconciliation: Ok(json!({ "Sonuc": "1", "DT_Bilgi": { "Toplam": "1" } })),
		}
	}
}

#[derive(Clone, Default)]
pub struct FakeGateway {
	script: Arc<Script>,
	calls:  Arc<Mutex<Vec<Call>>>,
}

impl FakeGateway {
	pub fn new(script: Script) -> Self {
		Self {
			script: Arc::new(script),
			calls:  Arc::new(Mutex::new(Vec::new())),
		}
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}

	fn record(&self, call: Call) {
		self.calls.lock().unwrap().push(call);
	}
}

fn answer<T: DeserializeOwned>(
	scripted: &Result<Value, GatewayError>,
) -> Result<T, GatewayError> {
	let value = scripted.clone()?;
	Ok(serde_json::from_value(value).unwrap())
}

#[async_trait]
impl PaymentGateway for FakeGateway {
	async fn pay(
		&self,
		request: PaymentRequest,
	) -> Result<PaymentResult, GatewayError> {
		self.record(Call::Pay(request));
		answer(&self.script.pay)
	}

	async fn partial_refund(
		&self,
		request: RefundRequest,
	) -> Result<GatewayStatus, GatewayError> {
		self.record(Call::Refund(request));
		answer(&self.script.refund)
	}

	async fn store_card(
		&self,
		request: StoreCardRequest,
	) -> Result<StoreCardResult, GatewayError> {
		self.record(Call::StoreCard(request));
		answer(&self.script.store)
	}

	async fn charge_stored_card(
		&self,
		request: StoredCardChargeRequest,
	) -> Result<PaymentResult, GatewayError> {
		self.record(Call::Charge(request));
		answer(&self.script.charge)
	}

	async fn list_stored_cards(
		&self,
		request: ListStoredCardsRequest,
	) -> Result<StoredCardList, GatewayError> {
		self.record(Call::List(request));
		let result = self.script.list.clone()?;
		Ok(StoredCardList {
			status:  serde_json::from_value(result.clone()).unwrap(),
			listing: parse_card_list(&result["DT_Bilgi"]),
		})
	}

	async fn delete_stored_card(
		&self,
		request: DeleteStoredCardRequest,
	) -> Result<GatewayStatus, GatewayError> {
		self.record(Call::Delete(request));
		answer(&self.script.delete)
	}

	async fn reconciliation_summary(
		&self,
		request: ReconciliationRequest,
	) -> Result<ReconciliationSummary, GatewayError> {
		self.record(Call::Reconcile(request));
		let result = self.script.reconciliation.clone()?;
		Ok(ReconciliationSummary {
			status: serde_json::from_value(result.clone()).unwrap(),
			detail: result.get("DT_Bilgi").filter(|v| !v.is_null()).cloned(),
		})
	}
}

pub fn test_settings() -> SmokeSettings {
	SmokeSettings {
		merchant:             MerchantIdentity::new(
			"10738",
			"0c13d406-873b-403b-9c09-a5766840d98c",
		),
		card:                 Card {
			number:       "4546711234567894".to_string(),
			expiry_month: "12".to_string(),
			expiry_year:  "2026".to_string(),
			cvc:          "000".to_string(),
			holder_name:  "TEST KART".to_string(),
			holder_phone: "5555555555".to_string(),
		},
		urls:                 RedirectUrls {
			success: "https://example.com/ok".to_string(),
			failure: "https://example.com/fail".to_string(),
		},
		installments:         1,
		payment_amount:       dec!(100.00),
		refund_amount:        dec!(50.00),
		stored_charge_amount: dec!(10.00),
		order_prefix:         "SMOKE".to_string(),
		stored_order_prefix:  "SMOKE-KS".to_string(),
		utc_offset:           UtcOffset::UTC,
	}
}
