use log::info;

use crate::domain::error::GatewayError;
use crate::domain::gateway::{PaymentGateway, PaymentRequest, PaymentResult};
use crate::domain::merchant::MerchantIdentity;
use crate::use_cases::dto::{PaymentCommand, RedirectUrls, SignedAmounts};

#[derive(Clone)]
pub struct MakePaymentUseCase<G: PaymentGateway> {
	gateway:  G,
	merchant: MerchantIdentity,
	urls:     RedirectUrls,
}

impl<G: PaymentGateway> MakePaymentUseCase<G> {
	pub fn new(gateway: G, merchant: MerchantIdentity, urls: RedirectUrls) -> Self {
		Self {
			gateway,
			merchant,
			urls,
		}
	}

	pub async fn execute(
		&self,
		command: PaymentCommand,
	) -> Result<PaymentResult, GatewayError> {
		let signed = SignedAmounts::compute(
			&self.merchant,
			&self.urls,
			&command.order_id,
			command.installments,
			command.amount,
		);

		info!(
			"Paying {} for order {}",
			signed.transaction_amount, command.order_id
		);

		self.gateway
			.pay(PaymentRequest {
				card:               command.card,
				order_id:           command.order_id,
				description:        command.description,
				installments:       command.installments,
				transaction_amount: signed.transaction_amount,
				total_amount:       signed.total_amount,
				signature:          signed.signature,
				failure_url:        self.urls.failure.clone(),
				success_url:        self.urls.success.clone(),
			})
			.await
	}
}
