use rust_decimal::Decimal;

use crate::domain::merchant::{Card, MerchantIdentity};
use crate::domain::order::{OrderId, format_amount};
use crate::domain::signature::{PaymentHashFields, Signature};
use crate::domain::stored_card::StoredCardHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct RedirectUrls {
	pub success: String,
	pub failure: String,
}

#[derive(Debug, Clone)]
pub struct PaymentCommand {
	pub card:         Card,
	pub order_id:     OrderId,
	pub amount:       Decimal,
	pub installments: u32,
	pub description:  String,
}

#[derive(Debug, Clone)]
pub struct StoredCardChargeCommand {
	pub handle:       StoredCardHandle,
	pub holder_phone: String,
	pub order_id:     OrderId,
	pub amount:       Decimal,
	pub installments: u32,
	pub description:  String,
}

/// Amount strings and the hash that covers them, shared by every signed call.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedAmounts {
	pub transaction_amount: String,
	pub total_amount:       String,
	pub signature:          Signature,
}

impl SignedAmounts {
	/// Installment-free flows charge no commission, so the transaction and
	/// total amounts are the same.
	pub fn compute(
		merchant: &MerchantIdentity,
		urls: &RedirectUrls,
		order_id: &OrderId,
		installments: u32,
		amount: Decimal,
	) -> Self {
		let transaction_amount = format_amount(amount);
		let total_amount = transaction_amount.clone();
		let signature = PaymentHashFields {
			merchant,
			installments,
			transaction_amount: &transaction_amount,
			total_amount: &total_amount,
			order_id,
			failure_url: &urls.failure,
			success_url: &urls.success,
		}
		.sign();

		Self {
			transaction_amount,
			total_amount,
			signature,
		}
	}
}

#[cfg(test)]
mod tests {
	use rust_decimal_macros::dec;
	use time::macros::datetime;

	use super::*;
	use crate::domain::signature::sign;

	#[test]
	fn test_signed_amounts_cover_formatted_fields() {
		let merchant =
			MerchantIdentity::new("10738", "0c13d406-873b-403b-9c09-a5766840d98c");
		let urls = RedirectUrls {
			success: "https://example.com/ok".to_string(),
			failure: "https://example.com/fail".to_string(),
		};
		let order_id =
			OrderId::generate("SMOKE", datetime!(2026-10-17 09:00:00 UTC));

		let signed = SignedAmounts::compute(&merchant, &urls, &order_id, 1, dec!(100));

		assert_eq!(signed.transaction_amount, "100,00");
		assert_eq!(signed.total_amount, "100,00");
		assert_eq!(signed.signature.as_str(), "/94StUbmcstH44M/3/fBv6Linzc=");
		assert_eq!(
			signed.signature,
			sign([
				"10738",
				"0c13d406-873b-403b-9c09-a5766840d98c",
				"1",
				"100,00",
				"100,00",
				"SMOKE-1792227600",
				"https://example.com/fail",
				"https://example.com/ok",
			])
		);
	}
}
