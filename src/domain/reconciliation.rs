use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

/// The 24 hour window the reconciliation summary is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationWindow {
	pub start: OffsetDateTime,
	pub end:   OffsetDateTime,
}

impl ReconciliationWindow {
	pub fn ending_at(end: OffsetDateTime, offset: UtcOffset) -> Self {
		let end = end.to_offset(offset);
		Self {
			start: end - Duration::hours(24),
			end,
		}
	}

	pub fn formatted_start(&self) -> String {
		format_gateway_datetime(self.start)
	}

	pub fn formatted_end(&self) -> String {
		format_gateway_datetime(self.end)
	}
}

/// `dd.mm.yyyy HH:MM:SS`, the only date format the gateway accepts.
pub fn format_gateway_datetime(at: OffsetDateTime) -> String {
	at.format(format_description!(
		"[day].[month].[year] [hour]:[minute]:[second]"
	))
	.unwrap_or_else(|_| at.unix_timestamp().to_string())
}
