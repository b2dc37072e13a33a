use log::info;
use time::{OffsetDateTime, UtcOffset};

use crate::domain::error::GatewayError;
use crate::domain::gateway::{
	PaymentGateway, ReconciliationRequest, ReconciliationSummary,
};
use crate::domain::reconciliation::ReconciliationWindow;

#[derive(Clone)]
pub struct ReconciliationSummaryUseCase<G: PaymentGateway> {
	gateway: G,
	offset:  UtcOffset,
}

impl<G: PaymentGateway> ReconciliationSummaryUseCase<G> {
	pub fn new(gateway: G, offset: UtcOffset) -> Self {
		Self { gateway, offset }
	}

	/// Summarises the 24 hours before `now`.
	pub async fn execute(
		&self,
		now: OffsetDateTime,
	) -> Result<ReconciliationSummary, GatewayError> {
		let window = ReconciliationWindow::ending_at(now, self.offset);
		info!(
			"Requesting reconciliation from {} to {}",
			window.formatted_start(),
			window.formatted_end()
		);
		self.gateway
			.reconciliation_summary(ReconciliationRequest { window })
			.await
	}
}
