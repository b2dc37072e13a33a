//! Request signing.
//!
//! The gateway authenticates the parameter set of payment-like calls with a
//! hash: the string forms of a fixed list of fields are concatenated without
//! any separator, hashed with SHA-1 and base64-encoded. Field order is part of
//! the remote contract; a wrong order is only noticed by the gateway, which
//! rejects the call with a hash mismatch.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_more::derive::Display;
use sha1::{Digest, Sha1};

use crate::domain::merchant::MerchantIdentity;
use crate::domain::order::OrderId;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// Hashes the concatenation of `fields`, in order, into a [`Signature`].
pub fn sign<I, S>(fields: I) -> Signature
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut hasher = Sha1::new();
	for field in fields {
		hasher.update(field.as_ref().as_bytes());
	}
	Signature(STANDARD.encode(hasher.finalize()))
}

/// Fields signed by the card payment and the stored-card charge calls.
#[derive(Debug, Clone)]
pub struct PaymentHashFields<'a> {
	pub merchant:           &'a MerchantIdentity,
	pub installments:       u32,
	pub transaction_amount: &'a str,
	pub total_amount:       &'a str,
	pub order_id:           &'a OrderId,
	pub failure_url:        &'a str,
	pub success_url:        &'a str,
}

impl PaymentHashFields<'_> {
	pub fn ordered(&self) -> [String; 8] {
		[
			self.merchant.client_code.clone(),
			self.merchant.guid.clone(),
			self.installments.to_string(),
			self.transaction_amount.to_string(),
			self.total_amount.to_string(),
			self.order_id.to_string(),
			self.failure_url.to_string(),
			self.success_url.to_string(),
		]
	}

	pub fn sign(&self) -> Signature {
		sign(self.ordered())
	}
}
