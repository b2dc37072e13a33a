use log::info;

use crate::domain::error::GatewayError;
use crate::domain::gateway::{
	PaymentGateway, PaymentResult, StoredCardChargeRequest,
};
use crate::domain::merchant::MerchantIdentity;
use crate::use_cases::dto::{RedirectUrls, SignedAmounts, StoredCardChargeCommand};

#[derive(Clone)]
pub struct ChargeStoredCardUseCase<G: PaymentGateway> {
	gateway:  G,
	merchant: MerchantIdentity,
	urls:     RedirectUrls,
}

impl<G: PaymentGateway> ChargeStoredCardUseCase<G> {
	pub fn new(gateway: G, merchant: MerchantIdentity, urls: RedirectUrls) -> Self {
		Self {
			gateway,
			merchant,
			urls,
		}
	}

	pub async fn execute(
		&self,
		command: StoredCardChargeCommand,
	) -> Result<PaymentResult, GatewayError> {
		let signed = SignedAmounts::compute(
			&self.merchant,
			&self.urls,
			&command.order_id,
			command.installments,
			command.amount,
		);

		info!(
			"Charging {} to stored card {} for order {}",
			signed.transaction_amount, command.handle, command.order_id
		);

		self.gateway
			.charge_stored_card(StoredCardChargeRequest {
				handle:             command.handle,
				holder_phone:       command.holder_phone,
				order_id:           command.order_id,
				description:        command.description,
				installments:       command.installments,
				transaction_amount: signed.transaction_amount,
				total_amount:       signed.total_amount,
				signature:          signed.signature,
				failure_url:        self.urls.failure.clone(),
				success_url:        self.urls.success.clone(),
				security_challenge: None,
			})
			.await
	}
}
