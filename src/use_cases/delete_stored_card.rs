use log::info;

use crate::domain::error::GatewayError;
use crate::domain::gateway::{
	DeleteStoredCardRequest, GatewayStatus, PaymentGateway,
};
use crate::domain::stored_card::StoredCardHandle;

#[derive(Clone)]
pub struct DeleteStoredCardUseCase<G: PaymentGateway> {
	gateway: G,
}

impl<G: PaymentGateway> DeleteStoredCardUseCase<G> {
	pub fn new(gateway: G) -> Self {
		Self { gateway }
	}

	pub async fn execute(
		&self,
		handle: StoredCardHandle,
	) -> Result<GatewayStatus, GatewayError> {
		info!("Deleting stored card {handle}");
		self.gateway
			.delete_stored_card(DeleteStoredCardRequest {
				handle,
				transaction_id: None,
			})
			.await
	}
}
