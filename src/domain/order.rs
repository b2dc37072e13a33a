use derive_more::derive::Display;
use rust_decimal::Decimal;
use time::OffsetDateTime;

/// Merchant-side order reference, `<prefix>-<unix-timestamp>`.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
	pub fn generate(prefix: &str, at: OffsetDateTime) -> Self {
		OrderId(format!("{prefix}-{}", at.unix_timestamp()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for OrderId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Formats an amount the way the gateway expects most amount fields: two
/// fractional digits behind a comma, no grouping.
pub fn format_amount(amount: Decimal) -> String {
	format!("{amount:.2}").replace('.', ",")
}

/// Formats an amount as a plain decimal, used by the partial refund call.
pub fn plain_amount(amount: Decimal) -> String {
	format!("{amount:.2}")
}
