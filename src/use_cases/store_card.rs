use log::info;

use crate::domain::error::GatewayError;
use crate::domain::gateway::{PaymentGateway, StoreCardRequest, StoreCardResult};
use crate::domain::merchant::Card;

#[derive(Clone)]
pub struct StoreCardUseCase<G: PaymentGateway> {
	gateway: G,
}

impl<G: PaymentGateway> StoreCardUseCase<G> {
	pub fn new(gateway: G) -> Self {
		Self { gateway }
	}

	/// Tokenizes `card`. A handle is only reported for a successful call.
	pub async fn execute(
		&self,
		card: Card,
	) -> Result<StoreCardResult, GatewayError> {
		info!("Storing card {}", card.masked_number());
		let mut result = self
			.gateway
			.store_card(StoreCardRequest { card })
			.await?;

		if !result.status.is_success() {
			result.handle = None;
		}
		Ok(result)
	}
}
