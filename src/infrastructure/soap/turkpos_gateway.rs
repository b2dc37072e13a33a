use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::error::GatewayError;
use crate::domain::gateway::{
	DeleteStoredCardRequest, Exchange, GatewayStatus, ListStoredCardsRequest,
	PaymentGateway, PaymentRequest, PaymentResult, ReconciliationRequest,
	ReconciliationSummary, RefundRequest, StoreCardRequest, StoreCardResult,
	StoredCardChargeRequest, StoredCardList,
};
use crate::domain::merchant::Credentials;
use crate::domain::order::plain_amount;
use crate::domain::stored_card::parse_card_list;
use crate::infrastructure::soap::client::SoapClient;
use crate::infrastructure::soap::envelope::SoapParam;

pub const PAYMENT_OPERATION: &str = "Pos_Odeme";
pub const PARTIAL_REFUND_OPERATION: &str = "TP_Islem_Iptal_Iade_Kismi2";
pub const STORE_CARD_OPERATION: &str = "KK_Saklama";
pub const STORED_CARD_CHARGE_OPERATION: &str = "KS_Tahsilat";
pub const LIST_STORED_CARDS_OPERATION: &str = "KK_Sakli_Liste";
pub const DELETE_STORED_CARD_OPERATION: &str = "KS_Kart_Sil";
pub const RECONCILIATION_OPERATION: &str = "TP_Mutabakat_Ozet";

pub const DEFAULT_REFUND_MODE: &str = "REFUND";
pub const NON_SECURE: &str = "NS";

/// Per-merchant values sent alongside the credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalSettings {
	pub guid:        String,
	pub client_ip:   String,
	pub ref_url:     String,
	/// `Durum` of the partial refund call.
	pub refund_mode: String,
}

/// [`PaymentGateway`] over the TurkPos SOAP service.
#[derive(Clone)]
pub struct TurkPosGateway {
	client:      Arc<SoapClient>,
	credentials: Credentials,
	terminal:    TerminalSettings,
}

impl TurkPosGateway {
	pub fn new(
		client: Arc<SoapClient>,
		credentials: Credentials,
		terminal: TerminalSettings,
	) -> Self {
		Self {
			client,
			credentials,
			terminal,
		}
	}

	fn credentials_block(&self) -> SoapParam {
		SoapParam::block("G", vec![
			SoapParam::text("CLIENT_CODE", &self.credentials.client_code),
			SoapParam::text("CLIENT_USERNAME", &self.credentials.username),
			SoapParam::text("CLIENT_PASSWORD", &self.credentials.password),
		])
	}

	fn extra_data() -> Vec<SoapParam> {
		(1..=5)
			.map(|i| SoapParam::empty(&format!("Data{i}")))
			.collect()
	}

	async fn invoke<T: DeserializeOwned>(
		&self,
		operation: &str,
		params: Vec<SoapParam>,
	) -> Result<T, GatewayError> {
		let result = self.client.call(operation, &params).await?;
		debug!("{operation} result: {result}");
		decode(operation, result)
	}

	async fn invoke_raw(
		&self,
		operation: &str,
		params: Vec<SoapParam>,
	) -> Result<(GatewayStatus, Value), GatewayError> {
		let result = self.client.call(operation, &params).await?;
		let status = GatewayStatus::deserialize(&result)
			.map_err(|e| GatewayError::malformed(operation, e.to_string()))?;
		Ok((status, result))
	}
}

fn decode<T: DeserializeOwned>(
	operation: &str,
	value: Value,
) -> Result<T, GatewayError> {
	serde_json::from_value(value)
		.map_err(|e| GatewayError::malformed(operation, e.to_string()))
}

/// The list payload is a .NET DataSet: an inline `schema` next to a
/// `diffgram` holding the rows.
fn dataset_rows(payload: &Value) -> &Value {
	payload.get("diffgram").unwrap_or(payload)
}

#[async_trait]
impl PaymentGateway for TurkPosGateway {
	async fn pay(
		&self,
		request: PaymentRequest,
	) -> Result<PaymentResult, GatewayError> {
		let card = &request.card;
		let mut params = vec![
			self.credentials_block(),
			SoapParam::text("GUID", &self.terminal.guid),
			SoapParam::text("KK_Sahibi", &card.holder_name),
			SoapParam::text("KK_No", &card.number),
			SoapParam::text("KK_SK_Ay", &card.expiry_month),
			SoapParam::text("KK_SK_Yil", &card.expiry_year),
			SoapParam::text("KK_CVC", &card.cvc),
			SoapParam::text("KK_Sahibi_GSM", &card.holder_phone),
			SoapParam::text("Hata_URL", &request.failure_url),
			SoapParam::text("Basarili_URL", &request.success_url),
			SoapParam::text("Siparis_ID", &request.order_id),
			SoapParam::text("Siparis_Aciklama", &request.description),
			SoapParam::text("Taksit", request.installments),
			SoapParam::text("Islem_Tutar", &request.transaction_amount),
			SoapParam::text("Toplam_Tutar", &request.total_amount),
			SoapParam::text("Islem_Hash", &request.signature),
			SoapParam::text("Islem_Guvenlik_Tip", NON_SECURE),
			SoapParam::empty("Islem_ID"),
			SoapParam::text("IPAdr", &self.terminal.client_ip),
			SoapParam::text("Ref_URL", &self.terminal.ref_url),
		];
		params.extend(Self::extra_data());

		self.invoke(PAYMENT_OPERATION, params).await
	}

	async fn partial_refund(
		&self,
		request: RefundRequest,
	) -> Result<GatewayStatus, GatewayError> {
		let params = vec![
			self.credentials_block(),
			SoapParam::text("GUID", &self.terminal.guid),
			SoapParam::text("Durum", &self.terminal.refund_mode),
			SoapParam::text("Siparis_ID", &request.order_id),
			SoapParam::text("Tutar", plain_amount(request.amount)),
		];

		self.invoke(PARTIAL_REFUND_OPERATION, params).await
	}

	async fn store_card(
		&self,
		request: StoreCardRequest,
	) -> Result<StoreCardResult, GatewayError> {
		let card = &request.card;
		let params = vec![
			self.credentials_block(),
			SoapParam::text("Kart_No", &card.number),
			SoapParam::text("KK_Sahibi", &card.holder_name),
			SoapParam::text("KK_No", &card.number),
			SoapParam::text("KK_SK_Ay", &card.expiry_month),
			SoapParam::text("KK_SK_Yil", &card.expiry_year),
			SoapParam::text("KK_CVV", &card.cvc),
			SoapParam::empty("Data1"),
			SoapParam::empty("Data2"),
			SoapParam::empty("Data3"),
		];

		self.invoke(STORE_CARD_OPERATION, params).await
	}

	async fn charge_stored_card(
		&self,
		request: StoredCardChargeRequest,
	) -> Result<PaymentResult, GatewayError> {
		let mut params = vec![
			self.credentials_block(),
			SoapParam::text("GUID", &self.terminal.guid),
			SoapParam::text("KS_GUID", &request.handle),
			SoapParam::optional("CW", request.security_challenge.as_deref()),
			SoapParam::text("KK_Sahibi_GSM", &request.holder_phone),
			SoapParam::text("Hata_URL", &request.failure_url),
			SoapParam::text("Basarili_URL", &request.success_url),
			SoapParam::text("Siparis_ID", &request.order_id),
			SoapParam::text("Siparis_Aciklama", &request.description),
			SoapParam::text("Taksit", request.installments),
			SoapParam::text("Islem_Tutar", &request.transaction_amount),
			SoapParam::text("Toplam_Tutar", &request.total_amount),
			SoapParam::text("Islem_Hash", &request.signature),
			SoapParam::text("Islem_Guvenlik_Tip", NON_SECURE),
			SoapParam::empty("Islem_ID"),
			SoapParam::text("IPAdr", &self.terminal.client_ip),
			SoapParam::text("Ref_URL", &self.terminal.ref_url),
		];
		params.extend(Self::extra_data());

		self.invoke(STORED_CARD_CHARGE_OPERATION, params).await
	}

	async fn list_stored_cards(
		&self,
		request: ListStoredCardsRequest,
	) -> Result<StoredCardList, GatewayError> {
		let params = vec![
			self.credentials_block(),
			SoapParam::text("Kart_No", &request.card_number),
			SoapParam::empty("KS_KK_Kisi_ID"),
		];

		let (status, result) =
			self.invoke_raw(LIST_STORED_CARDS_OPERATION, params).await?;
		let payload = result.get("DT_Bilgi").unwrap_or(&Value::Null);
		let listing = parse_card_list(dataset_rows(payload));

		Ok(StoredCardList { status, listing })
	}

	async fn delete_stored_card(
		&self,
		request: DeleteStoredCardRequest,
	) -> Result<GatewayStatus, GatewayError> {
		let params = vec![
			self.credentials_block(),
			SoapParam::text("KS_GUID", &request.handle),
			SoapParam::optional("KK_Islem_ID", request.transaction_id.as_deref()),
		];

		self.invoke(DELETE_STORED_CARD_OPERATION, params).await
	}

	async fn reconciliation_summary(
		&self,
		request: ReconciliationRequest,
	) -> Result<ReconciliationSummary, GatewayError> {
		let params = vec![
			self.credentials_block(),
			SoapParam::text("GUID", &self.terminal.guid),
			SoapParam::text("Tarih_Bas", request.window.formatted_start()),
			SoapParam::text("Tarih_Bit", request.window.formatted_end()),
		];

		let (status, result) =
			self.invoke_raw(RECONCILIATION_OPERATION, params).await?;
		let detail = result.get("DT_Bilgi").filter(|v| !v.is_null()).cloned();

		Ok(ReconciliationSummary { status, detail })
	}

	fn last_exchange(&self) -> Exchange {
		self.client.last_exchange()
	}
}
