use log::info;
use rust_decimal::Decimal;

use crate::domain::error::GatewayError;
use crate::domain::gateway::{GatewayStatus, PaymentGateway, RefundRequest};
use crate::domain::order::OrderId;

#[derive(Clone)]
pub struct PartialRefundUseCase<G: PaymentGateway> {
	gateway: G,
}

impl<G: PaymentGateway> PartialRefundUseCase<G> {
	pub fn new(gateway: G) -> Self {
		Self { gateway }
	}

	pub async fn execute(
		&self,
		order_id: OrderId,
		amount: Decimal,
	) -> Result<GatewayStatus, GatewayError> {
		info!("Refunding {amount} of order {order_id}");
		self.gateway
			.partial_refund(RefundRequest { order_id, amount })
			.await
	}
}
