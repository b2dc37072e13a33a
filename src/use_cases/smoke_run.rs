use log::{error, info, warn};
use rust_decimal::Decimal;
use time::{OffsetDateTime, UtcOffset};

use crate::config::Config;
use crate::domain::error::GatewayError;
use crate::domain::gateway::{GatewayStatus, PaymentGateway};
use crate::domain::merchant::{Card, MerchantIdentity};
use crate::domain::order::OrderId;
use crate::domain::stored_card::StoredCardHandle;
use crate::use_cases::charge_stored_card::ChargeStoredCardUseCase;
use crate::use_cases::delete_stored_card::DeleteStoredCardUseCase;
use crate::use_cases::dto::{PaymentCommand, RedirectUrls, StoredCardChargeCommand};
use crate::use_cases::list_stored_cards::ListStoredCardsUseCase;
use crate::use_cases::make_payment::MakePaymentUseCase;
use crate::use_cases::reconciliation_summary::ReconciliationSummaryUseCase;
use crate::use_cases::refund_payment::PartialRefundUseCase;
use crate::use_cases::report::{SmokeReport, Step, StepOutcome};
use crate::use_cases::store_card::StoreCardUseCase;

#[derive(Debug, Clone)]
pub struct SmokeSettings {
	pub merchant:             MerchantIdentity,
	pub card:                 Card,
	pub urls:                 RedirectUrls,
	pub installments:         u32,
	pub payment_amount:       Decimal,
	pub refund_amount:        Decimal,
	pub stored_charge_amount: Decimal,
	pub order_prefix:         String,
	pub stored_order_prefix:  String,
	pub utc_offset:           UtcOffset,
}

impl SmokeSettings {
	pub fn from_config(config: &Config) -> Self {
		Self {
			merchant:             config.merchant(),
			card:                 config.card(),
			urls:                 RedirectUrls {
				success: config.success_url.clone(),
				failure: config.failure_url.clone(),
			},
			installments:         config.installments,
			payment_amount:       config.payment_amount,
			refund_amount:        config.refund_amount,
			stored_charge_amount: config.stored_charge_amount,
			order_prefix:         config.order_prefix.clone(),
			stored_order_prefix:  config.stored_order_prefix.clone(),
			utc_offset:           config.utc_offset(),
		}
	}
}

/// Runs every gateway step in order. Steps never abort the run; a step whose
/// input was not produced is recorded as skipped.
pub struct SmokeRun<G: PaymentGateway + Clone> {
	settings:       SmokeSettings,
	payment:        MakePaymentUseCase<G>,
	refund:         PartialRefundUseCase<G>,
	store_card:     StoreCardUseCase<G>,
	charge:         ChargeStoredCardUseCase<G>,
	list_cards:     ListStoredCardsUseCase<G>,
	delete_card:    DeleteStoredCardUseCase<G>,
	reconciliation: ReconciliationSummaryUseCase<G>,
}

fn rejected(status: GatewayStatus) -> StepOutcome {
	StepOutcome::Rejected {
		code:    status.code,
		message: status.message,
	}
}

fn failed(step: Step, err: GatewayError) -> StepOutcome {
	error!("{step} failed: {err}");
	StepOutcome::Failed(err)
}

impl<G: PaymentGateway + Clone> SmokeRun<G> {
	pub fn new(gateway: G, settings: SmokeSettings) -> Self {
		Self {
			payment: MakePaymentUseCase::new(
				gateway.clone(),
				settings.merchant.clone(),
				settings.urls.clone(),
			),
			refund: PartialRefundUseCase::new(gateway.clone()),
			store_card: StoreCardUseCase::new(gateway.clone()),
			charge: ChargeStoredCardUseCase::new(
				gateway.clone(),
				settings.merchant.clone(),
				settings.urls.clone(),
			),
			list_cards: ListStoredCardsUseCase::new(gateway.clone()),
			delete_card: DeleteStoredCardUseCase::new(gateway.clone()),
			reconciliation: ReconciliationSummaryUseCase::new(
				gateway,
				settings.utc_offset,
			),
			settings,
		}
	}

	pub async fn execute(&self) -> SmokeReport {
		self.execute_at(OffsetDateTime::now_utc()).await
	}

	pub async fn execute_at(&self, now: OffsetDateTime) -> SmokeReport {
		let mut report = SmokeReport::default();

		let paid_order = self.pay(&mut report, now).await;
		self.refund_paid_order(&mut report, paid_order).await;

		let handle = self.store(&mut report).await;
		self.charge_stored_card(&mut report, handle.as_ref(), now).await;
		self.list(&mut report).await;
		self.delete(&mut report, handle).await;

		self.reconcile(&mut report, now).await;

		info!(
			"Smoke run finished: {} steps, {} failed or rejected",
			report.steps.len(),
			report.failures()
		);
		report
	}

	/// Returns the order id when the gateway accepted the payment.
	async fn pay(
		&self,
		report: &mut SmokeReport,
		now: OffsetDateTime,
	) -> Option<OrderId> {
		let order_id = OrderId::generate(&self.settings.order_prefix, now);
		let command = PaymentCommand {
			card:         self.settings.card.clone(),
			order_id:     order_id.clone(),
			amount:       self.settings.payment_amount,
			installments: self.settings.installments,
			description:  format!("Smoke test payment {order_id}"),
		};

		match self.payment.execute(command).await {
			Ok(result) if result.status.is_success() => {
				let transaction =
					result.transaction_id.unwrap_or_else(|| "-".to_string());
				report.record(
					Step::Payment,
					StepOutcome::Succeeded(format!(
						"order {order_id}, transaction {transaction}"
					)),
				);
				Some(order_id)
			}
			Ok(result) => {
				report.record(Step::Payment, rejected(result.status));
				None
			}
			Err(err) => {
				report.record(Step::Payment, failed(Step::Payment, err));
				None
			}
		}
	}

	async fn refund_paid_order(
		&self,
		report: &mut SmokeReport,
		paid_order: Option<OrderId>,
	) {
		let Some(order_id) = paid_order else {
			warn!("Skipping refund, payment did not succeed");
			report.record(
				Step::PartialRefund,
				StepOutcome::Skipped("payment did not succeed".to_string()),
			);
			return;
		};

		let outcome = match self
			.refund
			.execute(order_id.clone(), self.settings.refund_amount)
			.await
		{
			Ok(status) if status.is_success() => StepOutcome::Succeeded(format!(
				"refunded {} of order {order_id}",
				self.settings.refund_amount
			)),
			Ok(status) => rejected(status),
			Err(err) => failed(Step::PartialRefund, err),
		};
		report.record(Step::PartialRefund, outcome);
	}

	async fn store(&self, report: &mut SmokeReport) -> Option<StoredCardHandle> {
		match self
			.store_card
			.execute(self.settings.card.clone())
			.await
		{
			Ok(result) if result.status.is_success() => {
				let detail = match &result.handle {
					Some(handle) => format!("handle {handle}"),
					None => "no stored-card handle returned".to_string(),
				};
				report.record(Step::StoreCard, StepOutcome::Succeeded(detail));
				result.handle
			}
			Ok(result) => {
				report.record(Step::StoreCard, rejected(result.status));
				None
			}
			Err(err) => {
				report.record(Step::StoreCard, failed(Step::StoreCard, err));
				None
			}
		}
	}

	async fn charge_stored_card(
		&self,
		report: &mut SmokeReport,
		handle: Option<&StoredCardHandle>,
		now: OffsetDateTime,
	) {
		let Some(handle) = handle else {
			warn!("Skipping stored card charge, no handle");
			report.record(
				Step::StoredCardCharge,
				StepOutcome::Skipped("no stored-card handle".to_string()),
			);
			return;
		};

		let order_id = OrderId::generate(&self.settings.stored_order_prefix, now);
		let command = StoredCardChargeCommand {
			handle:       handle.clone(),
			holder_phone: self.settings.card.holder_phone.clone(),
			order_id:     order_id.clone(),
			amount:       self.settings.stored_charge_amount,
			installments: self.settings.installments,
			description:  format!("Smoke test stored card charge {order_id}"),
		};

		let outcome = match self.charge.execute(command).await {
			Ok(result) if result.status.is_success() => {
				StepOutcome::Succeeded(format!(
					"order {order_id}, transaction {}",
					result.transaction_id.as_deref().unwrap_or("-")
				))
			}
			Ok(result) => rejected(result.status),
			Err(err) => failed(Step::StoredCardCharge, err),
		};
		report.record(Step::StoredCardCharge, outcome);
	}

	async fn list(&self, report: &mut SmokeReport) {
		match self
			.list_cards
			.execute(self.settings.card.number.clone())
			.await
		{
			Ok(list) if list.status.is_success() => {
				let listing = list.listing;
				let details = listing
					.cards
					.iter()
					.map(|card| {
						format!(
							"{} | {} | {} | {} | {} {} {} | ****{} | {}",
							card.id,
							card.guid,
							card.formatted_timestamp(),
							card.masked_number,
							card.bank,
							card.brand,
							card.card_type,
							card.last_four,
							card.display_name()
						)
					})
					.collect();
				report.record_with_details(
					Step::ListStoredCards,
					StepOutcome::Succeeded(format!(
						"{} cards ({} layout, {} skipped)",
						listing.cards.len(),
						listing.layout,
						listing.skipped
					)),
					details,
				);
			}
			Ok(list) => report.record(Step::ListStoredCards, rejected(list.status)),
			Err(err) => report.record(
				Step::ListStoredCards,
				failed(Step::ListStoredCards, err),
			),
		}
	}

	async fn delete(
		&self,
		report: &mut SmokeReport,
		handle: Option<StoredCardHandle>,
	) {
		let Some(handle) = handle else {
			warn!("Skipping stored card deletion, no handle");
			report.record(
				Step::DeleteStoredCard,
				StepOutcome::Skipped("no stored-card handle".to_string()),
			);
			return;
		};

		let outcome = match self.delete_card.execute(handle.clone()).await {
			Ok(status) if status.is_success() => {
				StepOutcome::Succeeded(format!("deleted {handle}"))
			}
			Ok(status) => rejected(status),
			Err(err) => failed(Step::DeleteStoredCard, err),
		};
		report.record(Step::DeleteStoredCard, outcome);
	}

	async fn reconcile(&self, report: &mut SmokeReport, now: OffsetDateTime) {
		match self.reconciliation.execute(now).await {
			Ok(summary) if summary.status.is_success() => match summary.detail {
				Some(detail) => report.record_with_details(
					Step::ReconciliationSummary,
					StepOutcome::Succeeded("detail payload present".to_string()),
					vec![detail.to_string()],
				),
				None => report.record(
					Step::ReconciliationSummary,
					StepOutcome::Succeeded("no detail payload".to_string()),
				),
			},
			Ok(summary) => {
				report.record(Step::ReconciliationSummary, rejected(summary.status))
			}
			Err(err) => report.record(
				Step::ReconciliationSummary,
				failed(Step::ReconciliationSummary, err),
			),
		}
	}
}
