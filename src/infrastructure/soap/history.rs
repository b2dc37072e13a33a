use std::sync::{Mutex, PoisonError};

use crate::domain::gateway::Exchange;

/// Keeps the raw envelopes of the latest call only.
#[derive(Debug, Default)]
pub struct MessageHistory {
	last: Mutex<Exchange>,
}

impl MessageHistory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new exchange; the previous response is dropped with it.
	pub fn record_sent(&self, envelope: &[u8]) {
		let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
		*last = Exchange {
			sent:     Some(envelope.to_vec()),
			received: None,
		};
	}

	pub fn record_received(&self, envelope: &[u8]) {
		let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
		last.received = Some(envelope.to_vec());
	}

	pub fn last(&self) -> Exchange {
		self.last
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}
}
