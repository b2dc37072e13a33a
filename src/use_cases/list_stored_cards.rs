use log::{info, warn};

use crate::domain::error::GatewayError;
use crate::domain::gateway::{
	ListStoredCardsRequest, PaymentGateway, StoredCardList,
};
use crate::domain::stored_card::ListLayout;

#[derive(Clone)]
pub struct ListStoredCardsUseCase<G: PaymentGateway> {
	gateway: G,
}

impl<G: PaymentGateway> ListStoredCardsUseCase<G> {
	pub fn new(gateway: G) -> Self {
		Self { gateway }
	}

	pub async fn execute(
		&self,
		card_number: String,
	) -> Result<StoredCardList, GatewayError> {
		let list = self
			.gateway
			.list_stored_cards(ListStoredCardsRequest { card_number })
			.await?;

		let listing = &list.listing;
		if listing.layout == ListLayout::Malformed {
			warn!("Stored card list payload has an unrecognised shape");
		}
		if listing.skipped > 0 {
			warn!("Skipped {} unreadable stored card records", listing.skipped);
		}
		info!(
			"Found {} stored cards ({} layout)",
			listing.cards.len(),
			listing.layout
		);

		Ok(list)
	}
}
