use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::error::GatewayError;
use crate::domain::merchant::Card;
use crate::domain::order::OrderId;
use crate::domain::reconciliation::ReconciliationWindow;
use crate::domain::signature::Signature;
use crate::domain::stored_card::{CardListing, StoredCardHandle};

pub const SUCCESS_CODE: &str = "1";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GatewayStatus {
	#[serde(rename = "Sonuc", deserialize_with = "text")]
	pub code:    String,
	#[serde(rename = "Sonuc_Str", default, deserialize_with = "text")]
	pub message: String,
}

impl GatewayStatus {
	pub fn is_success(&self) -> bool {
		self.code == SUCCESS_CODE
	}
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PaymentResult {
	#[serde(flatten)]
	pub status:         GatewayStatus,
	#[serde(rename = "Islem_ID", default, deserialize_with = "optional_text")]
	pub transaction_id: Option<String>,
	#[serde(rename = "Banka_Sonuc_Kod", default, deserialize_with = "optional_text")]
	pub bank_code:      Option<String>,
	#[serde(rename = "UCD_URL", default, deserialize_with = "optional_text")]
	pub challenge_url:  Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(from = "StoreCardReply")]
pub struct StoreCardResult {
	pub status: GatewayStatus,
	pub handle: Option<StoredCardHandle>,
}

// The service answers with `GUID`; `KS_GUID` is the documented name.
#[derive(Deserialize)]
struct StoreCardReply {
	#[serde(flatten)]
	status:  GatewayStatus,
	#[serde(rename = "GUID", default, deserialize_with = "stored_handle")]
	guid:    Option<StoredCardHandle>,
	#[serde(rename = "KS_GUID", default, deserialize_with = "stored_handle")]
	ks_guid: Option<StoredCardHandle>,
}

impl From<StoreCardReply> for StoreCardResult {
	fn from(reply: StoreCardReply) -> Self {
		Self {
			status: reply.status,
			handle: reply.guid.or(reply.ks_guid),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredCardList {
	pub status:  GatewayStatus,
	pub listing: CardListing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationSummary {
	pub status: GatewayStatus,
	/// Left untyped until the provider documents its layout.
	pub detail: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct PaymentRequest {
	pub card:               Card,
	pub order_id:           OrderId,
	pub description:        String,
	pub installments:       u32,
	pub transaction_amount: String,
	pub total_amount:       String,
	pub signature:          Signature,
	pub failure_url:        String,
	pub success_url:        String,
}

#[derive(Debug, Clone)]
pub struct RefundRequest {
	pub order_id: OrderId,
	pub amount:   Decimal,
}

#[derive(Debug, Clone)]
pub struct StoreCardRequest {
	pub card: Card,
}

#[derive(Debug, Clone)]
pub struct StoredCardChargeRequest {
	pub handle:             StoredCardHandle,
	pub holder_phone:       String,
	pub order_id:           OrderId,
	pub description:        String,
	pub installments:       u32,
	pub transaction_amount: String,
	pub total_amount:       String,
	pub signature:          Signature,
	pub failure_url:        String,
	pub success_url:        String,
	/// Sent as `CW`; left empty in the non-secure flow.
	pub security_challenge: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListStoredCardsRequest {
	pub card_number: String,
}

#[derive(Debug, Clone)]
pub struct DeleteStoredCardRequest {
	pub handle:         StoredCardHandle,
	pub transaction_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReconciliationRequest {
	pub window: ReconciliationWindow,
}

/// Raw envelopes of the most recent gateway call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exchange {
	pub sent:     Option<Vec<u8>>,
	pub received: Option<Vec<u8>>,
}

impl Exchange {
	pub fn is_empty(&self) -> bool {
		self.sent.is_none() && self.received.is_none()
	}
}

#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
	async fn pay(
		&self,
		request: PaymentRequest,
	) -> Result<PaymentResult, GatewayError>;
	async fn partial_refund(
		&self,
		request: RefundRequest,
	) -> Result<GatewayStatus, GatewayError>;
	async fn store_card(
		&self,
		request: StoreCardRequest,
	) -> Result<StoreCardResult, GatewayError>;
	async fn charge_stored_card(
		&self,
		request: StoredCardChargeRequest,
	) -> Result<PaymentResult, GatewayError>;
	async fn list_stored_cards(
		&self,
		request: ListStoredCardsRequest,
	) -> Result<StoredCardList, GatewayError>;
	async fn delete_stored_card(
		&self,
		request: DeleteStoredCardRequest,
	) -> Result<GatewayStatus, GatewayError>;
	async fn reconciliation_summary(
		&self,
		request: ReconciliationRequest,
	) -> Result<ReconciliationSummary, GatewayError>;

	fn last_exchange(&self) -> Exchange {
		Exchange::default()
	}
}

// Decoded SOAP leaves are strings, empty elements are null; numbers show up
// when results are built by hand.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(match value {
		Value::String(text) if !text.is_empty() => Some(text),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	})
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn stored_handle<'de, D>(
	deserializer: D,
) -> Result<Option<StoredCardHandle>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = optional_text(deserializer)?;
	Ok(StoredCardHandle::parse(raw.as_deref()))
}
